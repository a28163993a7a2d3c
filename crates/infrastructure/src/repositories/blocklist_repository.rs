use async_trait::async_trait;
use pyrewall_application::ports::BlocklistRepository;
use pyrewall_domain::{BlockedDomain, DomainError};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use tracing::error;

pub struct SqliteBlocklistRepository {
    write: SqlitePool,
    read: SqlitePool,
}

impl SqliteBlocklistRepository {
    pub fn new(write: SqlitePool, read: SqlitePool) -> Self {
        Self { write, read }
    }

    fn row_to_domain(row: sqlx::sqlite::SqliteRow) -> BlockedDomain {
        BlockedDomain {
            id: Some(row.get::<i64, _>("id")),
            domain: Arc::from(row.get::<String, _>("domain").as_str()),
            created_at: row.get::<Option<String>, _>("created_at"),
        }
    }
}

#[async_trait]
impl BlocklistRepository for SqliteBlocklistRepository {
    async fn add(&self, domain: String) -> Result<BlockedDomain, DomainError> {
        let result = sqlx::query("INSERT OR IGNORE INTO blocked_domains (domain) VALUES (?)")
            .bind(&domain)
            .execute(&self.write)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to insert blocked domain");
                DomainError::DatabaseError(e.to_string())
            })?;

        let row = if result.rows_affected() > 0 {
            sqlx::query("SELECT id, domain, created_at FROM blocked_domains WHERE id = ?")
                .bind(result.last_insert_rowid())
                .fetch_one(&self.read)
                .await
        } else {
            sqlx::query("SELECT id, domain, created_at FROM blocked_domains WHERE domain = ?")
                .bind(&domain)
                .fetch_one(&self.read)
                .await
        }
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(Self::row_to_domain(row))
    }

    async fn remove(&self, domain: &str) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM blocked_domains WHERE domain = ?")
            .bind(domain)
            .execute(&self.write)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("domain {domain} not found")));
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<BlockedDomain>, DomainError> {
        let rows = sqlx::query("SELECT id, domain, created_at FROM blocked_domains ORDER BY domain")
            .fetch_all(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_domain).collect())
    }

    async fn exists(&self, domain: &str) -> Result<bool, DomainError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blocked_domains WHERE domain = ?")
            .bind(domain)
            .fetch_one(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(count.0 > 0)
    }
}
