use async_trait::async_trait;
use pyrewall_application::ports::BlockedIpRepository;
use pyrewall_domain::{BlockedIp, DomainError};
use sqlx::{Row, SqlitePool};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{error, info};

pub struct SqliteBlockedIpRepository {
    write: SqlitePool,
    read: SqlitePool,
}

impl SqliteBlockedIpRepository {
    pub fn new(write: SqlitePool, read: SqlitePool) -> Self {
        Self { write, read }
    }

    fn row_to_ip(row: sqlx::sqlite::SqliteRow) -> Result<BlockedIp, DomainError> {
        let ip_str: String = row.get("ip");
        let ip: Ipv4Addr = ip_str
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(ip_str.clone()))?;

        let expires_at: Option<String> = row.get("expires_at");
        let expires_at = expires_at
            .map(|s| chrono::DateTime::parse_from_rfc3339(&s).map(|d| d.with_timezone(&chrono::Utc)))
            .transpose()
            .map_err(|_| DomainError::ParseMalformed("blocked_ips.expires_at".to_string()))?;

        Ok(BlockedIp {
            ip,
            domain: row.get::<Option<String>, _>("domain").map(|d| Arc::from(d.as_str())),
            expires_at,
            reason: row.get::<Option<String>, _>("reason").map(|r| Arc::from(r.as_str())),
        })
    }
}

#[async_trait]
impl BlockedIpRepository for SqliteBlockedIpRepository {
    async fn get_all(&self) -> Result<Vec<BlockedIp>, DomainError> {
        let rows = sqlx::query("SELECT ip, domain, expires_at, reason FROM blocked_ips")
            .fetch_all(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_ip).collect()
    }

    async fn replace_authoritative(&self, ips: Vec<BlockedIp>) -> Result<(), DomainError> {
        let mut tx = self
            .write
            .begin()
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM blocked_ips WHERE expires_at IS NULL")
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        for entry in &ips {
            sqlx::query(
                "INSERT INTO blocked_ips (ip, domain, expires_at, reason)
                 VALUES (?, ?, NULL, NULL)
                 ON CONFLICT(ip) DO UPDATE SET domain = excluded.domain",
            )
            .bind(entry.ip.to_string())
            .bind(entry.domain.as_deref())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, ip = %entry.ip, "failed to insert derived blocked IP");
                DomainError::DatabaseError(e.to_string())
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        info!(count = ips.len(), "authoritative blocked IP set replaced");
        Ok(())
    }

    async fn upsert_temporary(&self, ip: BlockedIp) -> Result<(), DomainError> {
        let exists_authoritative: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM blocked_ips WHERE ip = ? AND expires_at IS NULL",
        )
        .bind(ip.ip.to_string())
        .fetch_one(&self.read)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        if exists_authoritative.0 > 0 {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO blocked_ips (ip, domain, expires_at, reason)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(ip) DO UPDATE SET
                domain = excluded.domain,
                expires_at = excluded.expires_at,
                reason = excluded.reason",
        )
        .bind(ip.ip.to_string())
        .bind(ip.domain.as_deref())
        .bind(ip.expires_at.map(|t| t.to_rfc3339()))
        .bind(ip.reason.as_deref())
        .execute(&self.write)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let result = sqlx::query("DELETE FROM blocked_ips WHERE expires_at IS NOT NULL AND expires_at <= ?")
            .bind(now)
            .execute(&self.write)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn contains(&self, ip: Ipv4Addr) -> Result<bool, DomainError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blocked_ips WHERE ip = ?")
            .bind(ip.to_string())
            .fetch_one(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(count.0 > 0)
    }
}
