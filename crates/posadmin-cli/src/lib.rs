// NOTE: Console layering
//
// - args: clap definitions only, no I/O
// - commands: one place that owns the tokio runtime and dispatches
// - handlers: drive a screen controller from posadmin-runtime, then hand a
//   view model to the renderer
// - presentation: serializable view models (JSON) that also implement
//   Display (plain tables)
//
// Handlers never print directly; everything on stdout goes through the
// renderer so `--format json` output stays machine-readable.

mod args;
mod commands;
pub mod context;
mod handlers;
pub mod logging;
pub mod presentation;

pub use args::{
    Cli, ClientCommand, Commands, InventoryCommand, LogLevel, OrderCommand, OutputFormat,
    ProductCommand, ReportCommand,
};
pub use commands::run;
