use async_trait::async_trait;
use pyrewall_application::ports::UserRepository;
use pyrewall_domain::{DomainError, Role, User};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

pub struct SqliteUserRepository {
    write: SqlitePool,
    read: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(write: SqlitePool, read: SqlitePool) -> Self {
        Self { write, read }
    }

    fn row_to_user(row: sqlx::sqlite::SqliteRow) -> Result<User, DomainError> {
        let role_str: String = row.get("role");
        Ok(User {
            username: Arc::from(row.get::<String, _>("username").as_str()),
            password: Arc::from(row.get::<String, _>("password").as_str()),
            role: Role::parse(&role_str)
                .ok_or_else(|| DomainError::ParseMalformed(format!("users.role = {role_str}")))?,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, ?)")
            .bind(user.username.as_ref())
            .bind(user.password.as_ref())
            .bind(user.role.as_str())
            .execute(&self.write)
            .await
            .map_err(|e| {
                if e.to_string().contains("UNIQUE constraint failed") {
                    DomainError::ParseMalformed(format!("user '{}' already exists", user.username))
                } else {
                    DomainError::DatabaseError(e.to_string())
                }
            })?;

        Ok(user)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT username, password, role FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_user).transpose()
    }

    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query("SELECT username, password, role FROM users")
            .fetch_all(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_user).collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(count.0 as u64)
    }
}
