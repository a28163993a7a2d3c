use std::sync::Arc;

use pyrewall_domain::{DomainError, HistoryEntry};

use crate::ports::HistoryRepository;

pub struct GetRecentHistoryUseCase {
    repo: Arc<dyn HistoryRepository>,
}

impl GetRecentHistoryUseCase {
    pub fn new(repo: Arc<dyn HistoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, limit: u32) -> Result<Vec<HistoryEntry>, DomainError> {
        self.repo.get_recent(limit).await
    }
}
