use async_trait::async_trait;
use pyrewall_domain::DomainError;

/// Application-layer port for the DNS proxy's UDP listener.
#[async_trait]
pub trait DnsProxyPort: Send + Sync {
    async fn start(&self) -> Result<(), DomainError>;

    async fn stop(&self) -> Result<(), DomainError>;

    /// Reloads the in-memory blocked-domain cache from the persistence layer.
    /// Read-only and safe to call concurrently with lookups.
    async fn refresh_from_db(&self) -> Result<(), DomainError>;
}
