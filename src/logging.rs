use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CONTROL_RANK_LOG";

/// Log to stdout, filtered by the `CONTROL_RANK_LOG` environment variable.
/// Defaults to `info`.
pub fn init_logging()
{
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
