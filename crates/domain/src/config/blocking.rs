use serde::{Deserialize, Serialize};

/// Ad-blocking and domain filtering configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// TTL in seconds applied to `BlockedIp` rows inserted as a side effect
    /// of a domain or application-signature match.
    #[serde(default = "default_temp_block_ttl_secs")]
    pub temp_block_ttl_secs: i64,

    /// Cadence, in seconds, at which the filter reloads the blocked-domain
    /// and blocked-IP caches absent an explicit reload signal.
    #[serde(default = "default_reload_interval_secs")]
    pub reload_interval_secs: u64,

    /// Cadence, in seconds, at which application signatures are reloaded.
    #[serde(default = "default_signature_reload_interval_secs")]
    pub signature_reload_interval_secs: u64,

    /// Cadence, in seconds, at which blocked domains are re-resolved and
    /// temporary `BlockedIp` rows are refreshed.
    #[serde(default = "default_resync_interval_secs")]
    pub resync_interval_secs: u64,

    /// Cadence, in seconds, at which expired `BlockedIp` rows are swept.
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            temp_block_ttl_secs: default_temp_block_ttl_secs(),
            reload_interval_secs: default_reload_interval_secs(),
            signature_reload_interval_secs: default_signature_reload_interval_secs(),
            resync_interval_secs: default_resync_interval_secs(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_temp_block_ttl_secs() -> i64 {
    300
}

fn default_reload_interval_secs() -> u64 {
    3
}

fn default_signature_reload_interval_secs() -> u64 {
    60
}

fn default_resync_interval_secs() -> u64 {
    300
}

fn default_cleanup_interval_secs() -> u64 {
    60
}
