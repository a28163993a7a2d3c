use async_trait::async_trait;
use pyrewall_domain::{AppSignature, DomainError};

#[async_trait]
pub trait AppSignatureRepository: Send + Sync {
    async fn create(&self, signature: AppSignature) -> Result<AppSignature, DomainError>;

    async fn delete(&self, id: i64) -> Result<(), DomainError>;

    /// Hot-reloaded by the filter engine every 60 s.
    async fn get_all(&self) -> Result<Vec<AppSignature>, DomainError>;
}
