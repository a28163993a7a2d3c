use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Directory holding the four logical databases. Falls back to
    /// `%LOCALAPPDATA%\Pyrewall\db` in packaged mode, or the working
    /// directory in development, when unset.
    #[serde(default = "default_root")]
    pub root: String,

    /// Seconds the write pool waits for a database lock before giving up.
    /// Matches the §4.1 retry budget of 5 retries at 150 ms ≈ 0.75 s.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    #[serde(default = "default_lock_retries")]
    pub lock_retries: u32,

    #[serde(default = "default_lock_retry_delay_ms")]
    pub lock_retry_delay_ms: u64,

    #[serde(default = "default_write_pool_max_connections")]
    pub write_pool_max_connections: u32,

    #[serde(default = "default_read_pool_max_connections")]
    pub read_pool_max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            busy_timeout_secs: default_busy_timeout_secs(),
            lock_retries: default_lock_retries(),
            lock_retry_delay_ms: default_lock_retry_delay_ms(),
            write_pool_max_connections: default_write_pool_max_connections(),
            read_pool_max_connections: default_read_pool_max_connections(),
        }
    }
}

fn default_root() -> String {
    "./pyrewall-db".to_string()
}

fn default_busy_timeout_secs() -> u64 {
    5
}

fn default_lock_retries() -> u32 {
    5
}

fn default_lock_retry_delay_ms() -> u64 {
    150
}

fn default_write_pool_max_connections() -> u32 {
    3
}

fn default_read_pool_max_connections() -> u32 {
    8
}
