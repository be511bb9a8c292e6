use anyhow::{Context as _, Result};
use posadmin_client::resolve_data_dir;
use tracing::debug;

use super::args::{Cli, Commands};
use super::context::ExecutionContext;
use super::handlers;
use super::logging;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let ctx = ExecutionContext::new(data_dir, cli.base_url.as_deref(), cli.format)?;
    debug!(
        data_dir = %ctx.data_dir().display(),
        base_url = %ctx.config().base_url,
        "starting"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(dispatch(&ctx, cli.command))
}

async fn dispatch(ctx: &ExecutionContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            handlers::session::login(ctx, &email, &password).await
        }
        Commands::Logout => handlers::session::logout(ctx),
        Commands::Whoami => handlers::session::whoami(ctx).await,
        Commands::Client { command } => handlers::client::handle(ctx, command).await,
        Commands::Product { command } => handlers::product::handle(ctx, command).await,
        Commands::Inventory { command } => handlers::inventory::handle(ctx, command).await,
        Commands::Order { command } => handlers::order::handle(ctx, command).await,
        Commands::Report { command } => handlers::report::handle(ctx, command).await,
    }
}
