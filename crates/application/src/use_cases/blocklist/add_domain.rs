use std::sync::Arc;

use pyrewall_domain::{BlockedDomain, DomainError};
use tracing::info;

use crate::ports::{BlocklistRepository, PacketFilterEnginePort};

/// Normalizes and persists a new authoritative blocked domain, then asks
/// the filter engine to pick it up on its next 3 s reload.
pub struct AddBlockedDomainUseCase {
    repo: Arc<dyn BlocklistRepository>,
    filter: Arc<dyn PacketFilterEnginePort>,
}

impl AddBlockedDomainUseCase {
    pub fn new(repo: Arc<dyn BlocklistRepository>, filter: Arc<dyn PacketFilterEnginePort>) -> Self {
        Self { repo, filter }
    }

    pub async fn execute(&self, raw: &str) -> Result<BlockedDomain, DomainError> {
        let normalized = BlockedDomain::normalize(raw)?;
        let created = self.repo.add(normalized).await?;
        self.filter.notify_reload();
        info!(domain = %created.domain, "blocked domain added");
        Ok(created)
    }
}
