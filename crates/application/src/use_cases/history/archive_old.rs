use std::sync::Arc;

use pyrewall_domain::DomainError;
use tracing::info;

use crate::ports::HistoryRepository;

/// Copies history entries older than `retention_days` into the archive
/// table and removes them from the live table.
pub struct ArchiveOldHistoryUseCase {
    repo: Arc<dyn HistoryRepository>,
}

impl ArchiveOldHistoryUseCase {
    pub fn new(repo: Arc<dyn HistoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, retention_days: i64) -> Result<u64, DomainError> {
        let archived = self.repo.archive_older_than(retention_days).await?;
        if archived > 0 {
            info!(archived, retention_days, "history entries archived");
        }
        Ok(archived)
    }
}
