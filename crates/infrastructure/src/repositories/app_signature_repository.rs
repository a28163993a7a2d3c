use async_trait::async_trait;
use pyrewall_application::ports::AppSignatureRepository;
use pyrewall_domain::{AppSignature, DomainError, Protocol};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

pub struct SqliteAppSignatureRepository {
    write: SqlitePool,
    read: SqlitePool,
}

impl SqliteAppSignatureRepository {
    pub fn new(write: SqlitePool, read: SqlitePool) -> Self {
        Self { write, read }
    }

    fn row_to_signature(row: sqlx::sqlite::SqliteRow) -> Result<AppSignature, DomainError> {
        let protocol_str: String = row.get("protocol");

        Ok(AppSignature {
            id: Some(row.get::<i64, _>("id")),
            app_name: Arc::from(row.get::<String, _>("app_name").as_str()),
            pattern: Arc::from(row.get::<String, _>("pattern").as_str()),
            ip_range: row.get::<Option<String>, _>("ip_range").map(|s| Arc::from(s.as_str())),
            protocol: Protocol::parse(&protocol_str)
                .ok_or_else(|| DomainError::ParseMalformed(format!("app_signatures.protocol = {protocol_str}")))?,
        })
    }
}

#[async_trait]
impl AppSignatureRepository for SqliteAppSignatureRepository {
    async fn create(&self, signature: AppSignature) -> Result<AppSignature, DomainError> {
        let result = sqlx::query(
            "INSERT INTO app_signatures (app_name, pattern, ip_range, protocol) VALUES (?, ?, ?, ?)",
        )
        .bind(signature.app_name.as_ref())
        .bind(signature.pattern.as_ref())
        .bind(signature.ip_range.as_deref())
        .bind(signature.protocol.as_str())
        .execute(&self.write)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                DomainError::ParseMalformed(format!("app signature '{}' already exists", signature.app_name))
            } else {
                DomainError::DatabaseError(e.to_string())
            }
        })?;

        Ok(AppSignature {
            id: Some(result.last_insert_rowid()),
            ..signature
        })
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM app_signatures WHERE id = ?")
            .bind(id)
            .execute(&self.write)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("app signature {id} not found")));
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<AppSignature>, DomainError> {
        let rows = sqlx::query("SELECT id, app_name, pattern, ip_range, protocol FROM app_signatures")
            .fetch_all(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_signature).collect()
    }
}
