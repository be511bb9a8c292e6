use crate::args::LogLevel;
use tracing_subscriber::EnvFilter;

fn directives(level: LogLevel) -> String {
    format!(
        "warn,posadmin={level},posadmin_client={level},posadmin_runtime={level}",
        level = level
    )
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--log-level`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
