use pyrewall_domain::config::Config;
use tracing_subscriber::EnvFilter;

/// Initializes the global `tracing` subscriber from `config.logging`.
/// `RUST_LOG` overrides the configured level if set.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false);

    if config.logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!(level = %config.logging.level, json = config.logging.json, "logging initialized");
}
