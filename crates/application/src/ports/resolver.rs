use async_trait::async_trait;
use pyrewall_domain::DomainError;
use std::collections::HashSet;
use std::net::Ipv4Addr;

/// Expands `domain` to its conventional subdomain variants and resolves
/// each via the OS resolver with bounded parallelism, merging the results.
/// Individual lookup failures are swallowed; the call itself must not
/// block indefinitely.
#[async_trait]
pub trait DomainResolver: Send + Sync {
    async fn resolve(&self, domain: &str) -> Result<HashSet<Ipv4Addr>, DomainError>;
}
