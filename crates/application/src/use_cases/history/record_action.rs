use std::sync::Arc;

use pyrewall_domain::{DomainError, HistoryEntry};

use crate::ports::HistoryRepository;

/// Writes a single audit entry. Called on every significant user action
/// (domain added/removed, device blocked/unblocked, user created, ...).
pub struct RecordHistoryUseCase {
    repo: Arc<dyn HistoryRepository>,
}

impl RecordHistoryUseCase {
    pub fn new(repo: Arc<dyn HistoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        username: Arc<str>,
        action: Arc<str>,
        description: Option<Arc<str>>,
    ) -> Result<(), DomainError> {
        self.repo
            .record(HistoryEntry::new(username, action, description))
            .await
    }
}
