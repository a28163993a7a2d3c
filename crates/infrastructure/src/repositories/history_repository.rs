use async_trait::async_trait;
use pyrewall_application::ports::HistoryRepository;
use pyrewall_domain::{DomainError, HistoryEntry};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use tracing::info;

pub struct SqliteHistoryRepository {
    write: SqlitePool,
    read: SqlitePool,
}

impl SqliteHistoryRepository {
    pub fn new(write: SqlitePool, read: SqlitePool) -> Self {
        Self { write, read }
    }
}

#[async_trait]
impl HistoryRepository for SqliteHistoryRepository {
    async fn record(&self, entry: HistoryEntry) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO history (username, action, description) VALUES (?, ?, ?)")
            .bind(entry.username.as_ref())
            .bind(entry.action.as_ref())
            .bind(entry.description.as_deref())
            .execute(&self.write)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn get_recent(&self, limit: u32) -> Result<Vec<HistoryEntry>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, username, action, description, timestamp FROM history
             ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.read)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| HistoryEntry {
                id: Some(row.get::<i64, _>("id")),
                username: Arc::from(row.get::<String, _>("username").as_str()),
                action: Arc::from(row.get::<String, _>("action").as_str()),
                description: row.get::<Option<String>, _>("description").map(|d| Arc::from(d.as_str())),
                timestamp: row.get::<Option<String>, _>("timestamp"),
            })
            .collect())
    }

    async fn archive_older_than(&self, days: i64) -> Result<u64, DomainError> {
        let cutoff = (chrono::Utc::now() - chrono::Duration::days(days)).to_rfc3339();

        let mut tx = self
            .write
            .begin()
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        sqlx::query(
            "INSERT INTO history_archive (id, username, action, description, timestamp)
             SELECT id, username, action, description, timestamp FROM history WHERE timestamp <= ?",
        )
        .bind(&cutoff)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        let deleted = sqlx::query("DELETE FROM history WHERE timestamp <= ?")
            .bind(&cutoff)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?
            .rows_affected();

        tx.commit()
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        if deleted > 0 {
            info!(deleted, cutoff = %cutoff, "history entries archived");
        }
        Ok(deleted)
    }
}
