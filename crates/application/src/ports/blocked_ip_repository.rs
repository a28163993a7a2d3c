use async_trait::async_trait;
use pyrewall_domain::{BlockedIp, DomainError};
use std::net::Ipv4Addr;

/// Repository for the derived `BlockedIP` set (authoritative rows produced by
/// sync, plus short-lived temporary rows observed at runtime).
#[async_trait]
pub trait BlockedIpRepository: Send + Sync {
    /// Returns every row, authoritative and temporary, for the filter
    /// engine's in-memory cache.
    async fn get_all(&self) -> Result<Vec<BlockedIp>, DomainError>;

    /// Deletes every authoritative row (`expires_at IS NULL`) and inserts
    /// `ips` in a single transaction. Callers must have already excluded
    /// the critical-protection set.
    async fn replace_authoritative(&self, ips: Vec<BlockedIp>) -> Result<(), DomainError>;

    /// Upserts a single temporary row with the given TTL. No-op if `ip`
    /// collides with an existing authoritative row.
    async fn upsert_temporary(&self, ip: BlockedIp) -> Result<(), DomainError>;

    /// Deletes every row whose `expires_at` has passed. Returns the count removed.
    async fn delete_expired(&self) -> Result<u64, DomainError>;

    async fn contains(&self, ip: Ipv4Addr) -> Result<bool, DomainError>;
}
