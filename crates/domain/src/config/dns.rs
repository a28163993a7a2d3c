use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_upstream")]
    pub upstream: String,

    #[serde(default = "default_forward_timeout_ms")]
    pub forward_timeout_ms: u64,

    #[serde(default = "default_receive_timeout_secs")]
    pub receive_timeout_secs: u64,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            upstream: default_upstream(),
            forward_timeout_ms: default_forward_timeout_ms(),
            receive_timeout_secs: default_receive_timeout_secs(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:53".to_string()
}

fn default_upstream() -> String {
    "8.8.8.8:53".to_string()
}

fn default_forward_timeout_ms() -> u64 {
    2_000
}

fn default_receive_timeout_secs() -> u64 {
    1
}
