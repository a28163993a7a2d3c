use async_trait::async_trait;
use pyrewall_domain::{DomainError, HistoryEntry};

/// Append-only audit log. `archive_older_than` copies matching rows into a
/// parallel archive table (stamped with `archived_at`) and deletes them
/// from the live table.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn record(&self, entry: HistoryEntry) -> Result<(), DomainError>;

    async fn get_recent(&self, limit: u32) -> Result<Vec<HistoryEntry>, DomainError>;

    async fn archive_older_than(&self, days: i64) -> Result<u64, DomainError>;
}
