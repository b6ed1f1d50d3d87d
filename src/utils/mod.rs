use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "cashflow=info";

/// Builds the filter: `RUST_LOG` when set, else `configured`, else [`DEFAULT_LOG_FILTER`].
pub fn log_filter(configured: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    configured
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber. Logs go to stderr so command output stays parseable.
pub fn init_tracing(configured: Option<&str>) {
    let _ = fmt()
        .with_env_filter(log_filter(configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
