use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blog_posts=info"))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(config: &Config) {
    let registry = tracing_subscriber::registry().with(filter());
    let result = match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    if result.is_ok() {
        tracing::debug!(format = ?config.log_format, "logging initialized");
    }
}

/// Subscriber for test runs: output is captured by the test harness.
pub fn init_for_tests() {
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
