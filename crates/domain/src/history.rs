use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An append-only record of a significant administrator action. Entries are
/// never mutated or deleted in place — the retention job copies them to a
/// parallel archive table instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: Option<i64>,
    pub username: Arc<str>,
    pub action: Arc<str>,
    pub description: Option<Arc<str>>,
    pub timestamp: Option<String>,
}

impl HistoryEntry {
    pub fn new(username: Arc<str>, action: Arc<str>, description: Option<Arc<str>>) -> Self {
        Self {
            id: None,
            username,
            action,
            description,
            timestamp: None,
        }
    }
}
