use std::net::Ipv4Addr;
use std::sync::Arc;

use pyrewall_domain::DomainError;
use tracing::info;

use crate::ports::DeviceRepository;

pub struct UnblockDeviceUseCase {
    repo: Arc<dyn DeviceRepository>,
}

impl UnblockDeviceUseCase {
    pub fn new(repo: Arc<dyn DeviceRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, ip: Ipv4Addr) -> Result<(), DomainError> {
        self.repo.unblock_device(ip).await?;
        info!(%ip, "device unblocked");
        Ok(())
    }
}
