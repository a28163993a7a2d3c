use async_trait::async_trait;
use pyrewall_domain::DomainError;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpEntry {
    pub ip: Ipv4Addr,
    pub mac: String,
}

/// Reads the OS ARP table. On Windows this is backed by the IP Helper
/// `GetIpNetTable2` family; a `/proc/net/arp` reader is retained for
/// development and test builds on Linux.
#[async_trait]
pub trait ArpReader: Send + Sync {
    async fn read_arp_table(&self) -> Result<Vec<ArpEntry>, DomainError>;
}

/// Resolves the IEEE OUI vendor name for a MAC address, and best-effort
/// reverse-resolves a hostname for an IP. Both are allowed to return `None`.
#[async_trait]
pub trait DeviceEnrichment: Send + Sync {
    fn lookup_vendor(&self, mac: &str) -> Option<String>;

    async fn reverse_hostname(&self, ip: Ipv4Addr) -> Option<String>;
}

/// Detects the host's default IPv4 gateway, feeding the critical-protection set.
#[async_trait]
pub trait GatewayDetector: Send + Sync {
    async fn detect_gateway(&self) -> Option<Ipv4Addr>;
}
