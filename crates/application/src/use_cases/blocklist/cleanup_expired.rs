use std::sync::Arc;

use pyrewall_domain::DomainError;
use tracing::debug;

use crate::ports::BlockedIpRepository;

/// Deletes every `BlockedIP` row whose `expires_at` has passed. Intended
/// to run on a >= 60 s cadence from the filter thread's maintenance loop.
pub struct CleanupExpiredUseCase {
    repo: Arc<dyn BlockedIpRepository>,
}

impl CleanupExpiredUseCase {
    pub fn new(repo: Arc<dyn BlockedIpRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> Result<u64, DomainError> {
        let removed = self.repo.delete_expired().await?;
        if removed > 0 {
            debug!(removed, "expired blocked IP rows swept");
        }
        Ok(removed)
    }
}
