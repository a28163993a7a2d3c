use async_trait::async_trait;
use pyrewall_domain::{BlockedDevice, DomainError, LiveDevice};
use std::net::Ipv4Addr;

/// Repository for the administrator-managed `BlockedDevice` table and the
/// ephemeral `LiveDeviceSnapshot` table maintained by the device scanner.
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    async fn block_device(&self, ip: Ipv4Addr, mac: String) -> Result<BlockedDevice, DomainError>;

    async fn unblock_device(&self, ip: Ipv4Addr) -> Result<(), DomainError>;

    async fn get_blocked_devices(&self) -> Result<Vec<BlockedDevice>, DomainError>;

    async fn is_blocked(&self, ip: Ipv4Addr) -> Result<bool, DomainError>;

    /// Atomically replaces the live device snapshot with `devices`.
    async fn replace_live_snapshot(&self, devices: Vec<LiveDevice>) -> Result<(), DomainError>;

    async fn get_live_snapshot(&self) -> Result<Vec<LiveDevice>, DomainError>;
}
