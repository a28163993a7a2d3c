use pyrewall_domain::config::{CliOverrides, Config};
use tracing::info;

pub fn load_config(config_path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        db_root = %config.database.root,
        dns_bind = %config.dns.bind_address,
        "configuration loaded"
    );

    Ok(config)
}
