use std::sync::Arc;

use pyrewall_domain::DomainError;
use tracing::info;

use crate::ports::{BlocklistRepository, PacketFilterEnginePort};

pub struct RemoveBlockedDomainUseCase {
    repo: Arc<dyn BlocklistRepository>,
    filter: Arc<dyn PacketFilterEnginePort>,
}

impl RemoveBlockedDomainUseCase {
    pub fn new(repo: Arc<dyn BlocklistRepository>, filter: Arc<dyn PacketFilterEnginePort>) -> Self {
        Self { repo, filter }
    }

    pub async fn execute(&self, domain: &str) -> Result<(), DomainError> {
        self.repo.remove(domain).await?;
        self.filter.notify_reload();
        info!(domain, "blocked domain removed");
        Ok(())
    }
}
