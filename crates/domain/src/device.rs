use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::sync::Arc;

/// A device the administrator has chosen to block at the host/ARP level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockedDevice {
    pub ip: Ipv4Addr,
    pub mac: Arc<str>,
    pub date_blocked: Option<String>,
}

/// One row of the ephemeral, overview-only live-device snapshot. The whole
/// table is replaced on every device-scanner pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LiveDevice {
    pub ip: Ipv4Addr,
    pub mac: Arc<str>,
    pub vendor: Option<Arc<str>>,
    pub dev_type: Option<Arc<str>>,
    pub last_seen: String,
}
