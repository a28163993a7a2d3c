use serde::{Deserialize, Serialize};

use super::{
    BlockingConfig, ConfigError, DatabaseConfig, DnsConfig, LoggingConfig, PacketFilterConfig,
    ServerConfig,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dns: DnsConfig,
    #[serde(default)]
    pub blocking: BlockingConfig,
    #[serde(default)]
    pub packet_filter: PacketFilterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values supplied on the command line; each `Some` wins over both the
/// config file and the compiled-in default.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_root: Option<String>,
    pub dns_bind_address: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Layered load: compiled-in defaults, then `config_path` (or
    /// `pyrewall.toml` in the working directory if it exists and no path
    /// was given), then environment variables, then `overrides`.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                if std::path::Path::new("pyrewall.toml").exists() {
                    Self::from_file("pyrewall.toml")?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env();
        config.apply_overrides(overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("PYREWALL_DB_ROOT") {
            self.database.root = v;
        }
        if let Ok(v) = std::env::var("PYREWALL_DNS_BIND_ADDRESS") {
            self.dns.bind_address = v;
        }
        if let Ok(v) = std::env::var("PYREWALL_LOG_LEVEL") {
            self.logging.level = v;
        }
    }

    fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(v) = overrides.db_root {
            self.database.root = v;
        }
        if let Some(v) = overrides.dns_bind_address {
            self.dns.bind_address = v;
        }
        if let Some(v) = overrides.log_level {
            self.logging.level = v;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "dns.bind_address is not a valid socket address: {}",
                self.dns.bind_address
            )));
        }
        if self.blocking.reload_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "blocking.reload_interval_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
