use std::net::Ipv4Addr;
use std::sync::Arc;

use pyrewall_domain::{BlockedIp, CriticalProtectionSet, DomainError};
use tracing::debug;

use crate::ports::BlockedIpRepository;

/// Inserts a short-lived `BlockedIP` row observed at runtime (domain
/// side-effect or application-signature match in the filter pipeline).
/// Silently refused if `ip` is in the critical-protection set.
pub struct AddTemporaryBlockIpUseCase {
    repo: Arc<dyn BlockedIpRepository>,
}

impl AddTemporaryBlockIpUseCase {
    pub fn new(repo: Arc<dyn BlockedIpRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        ip: Ipv4Addr,
        domain: Option<Arc<str>>,
        ttl_secs: i64,
        critical: &CriticalProtectionSet,
    ) -> Result<(), DomainError> {
        if critical.contains(&ip) {
            debug!(%ip, "refusing temporary block of critical-protection address");
            return Ok(());
        }
        self.repo.upsert_temporary(BlockedIp::temporary(ip, domain, ttl_secs)).await
    }
}
