use serde::{Deserialize, Serialize};

/// Tuning for the inline packet filter engine.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PacketFilterConfig {
    /// Fixed WinDivert-style capture filter. Not meant to be edited by
    /// non-experts; exposed for tests that need a narrower capture.
    #[serde(default = "default_capture_filter")]
    pub capture_filter: String,

    #[serde(default = "default_receive_timeout_ms")]
    pub receive_timeout_ms: u64,

    #[serde(default = "default_counter_flush_interval_ms")]
    pub counter_flush_interval_ms: u64,

    #[serde(default = "default_reinject_backoff_initial_ms")]
    pub reinject_backoff_initial_ms: u64,

    #[serde(default = "default_reinject_backoff_multiplier")]
    pub reinject_backoff_multiplier: f64,

    #[serde(default = "default_reinject_backoff_max_ms")]
    pub reinject_backoff_max_ms: u64,

    #[serde(default = "default_reinject_failure_log_threshold")]
    pub reinject_failure_log_threshold: u32,
}

impl Default for PacketFilterConfig {
    fn default() -> Self {
        Self {
            capture_filter: default_capture_filter(),
            receive_timeout_ms: default_receive_timeout_ms(),
            counter_flush_interval_ms: default_counter_flush_interval_ms(),
            reinject_backoff_initial_ms: default_reinject_backoff_initial_ms(),
            reinject_backoff_multiplier: default_reinject_backoff_multiplier(),
            reinject_backoff_max_ms: default_reinject_backoff_max_ms(),
            reinject_failure_log_threshold: default_reinject_failure_log_threshold(),
        }
    }
}

fn default_capture_filter() -> String {
    "(inbound or outbound) and (tcp.DstPort == 80 or tcp.DstPort == 443 or udp.DstPort == 443)"
        .to_string()
}

fn default_receive_timeout_ms() -> u64 {
    500
}

fn default_counter_flush_interval_ms() -> u64 {
    1_000
}

fn default_reinject_backoff_initial_ms() -> u64 {
    50
}

fn default_reinject_backoff_multiplier() -> f64 {
    1.3
}

fn default_reinject_backoff_max_ms() -> u64 {
    1_000
}

fn default_reinject_failure_log_threshold() -> u32 {
    50
}
