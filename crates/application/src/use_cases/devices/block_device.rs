use std::net::Ipv4Addr;
use std::sync::Arc;

use pyrewall_domain::{BlockedDevice, DomainError};
use tracing::info;

use crate::ports::DeviceRepository;

/// Marks `ip`/`mac` as blocked. Manages the `BlockedDevice` table and the
/// host-level side effects (ARP, OS firewall) documented in the external
/// interfaces; the packet filter reloads this table independently and drops
/// traffic to/from a blocked device's IP regardless of those side effects.
pub struct BlockDeviceUseCase {
    repo: Arc<dyn DeviceRepository>,
}

impl BlockDeviceUseCase {
    pub fn new(repo: Arc<dyn DeviceRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, ip: Ipv4Addr, mac: String) -> Result<BlockedDevice, DomainError> {
        let blocked = self.repo.block_device(ip, mac).await?;
        info!(%ip, mac = %blocked.mac, "device blocked");
        Ok(blocked)
    }
}
