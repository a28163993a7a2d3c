use async_trait::async_trait;
use pyrewall_domain::{DomainError, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> Result<User, DomainError>;

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    async fn get_all(&self) -> Result<Vec<User>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
