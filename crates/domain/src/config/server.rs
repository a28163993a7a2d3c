use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Seconds `stop_firewall(wait=true)` polls readiness for before giving
    /// up.
    #[serde(default = "default_stop_timeout_secs")]
    pub stop_timeout_secs: f64,

    /// Cadence, in seconds, of the live-device scanner.
    #[serde(default = "default_device_scan_interval_secs")]
    pub device_scan_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            stop_timeout_secs: default_stop_timeout_secs(),
            device_scan_interval_secs: default_device_scan_interval_secs(),
        }
    }
}

fn default_stop_timeout_secs() -> f64 {
    8.0
}

fn default_device_scan_interval_secs() -> u64 {
    30
}
