use async_trait::async_trait;
use pyrewall_domain::{BlockedDomain, DomainError};

/// Repository for the administrator-entered, authoritative blocked-domain set.
#[async_trait]
pub trait BlocklistRepository: Send + Sync {
    async fn add(&self, domain: String) -> Result<BlockedDomain, DomainError>;

    async fn remove(&self, domain: &str) -> Result<(), DomainError>;

    async fn get_all(&self) -> Result<Vec<BlockedDomain>, DomainError>;

    async fn exists(&self, domain: &str) -> Result<bool, DomainError>;
}
