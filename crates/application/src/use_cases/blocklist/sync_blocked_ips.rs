use std::collections::HashSet;
use std::sync::Arc;

use pyrewall_domain::{BlockedIp, CriticalProtectionSet, DomainError};
use tracing::{debug, info, warn};

use crate::ports::{BlockedIpRepository, BlocklistRepository, DomainResolver, PacketFilterEnginePort};

/// Recomputes the derived `BlockedIP` set from the authoritative
/// `BlockedDomain` set: resolve every domain, union the results, drop
/// anything in the critical-protection set, and replace the authoritative
/// rows in a single transaction.
pub struct SyncBlockedIpsUseCase {
    blocklist_repo: Arc<dyn BlocklistRepository>,
    blocked_ip_repo: Arc<dyn BlockedIpRepository>,
    resolver: Arc<dyn DomainResolver>,
    filter: Arc<dyn PacketFilterEnginePort>,
}

impl SyncBlockedIpsUseCase {
    pub fn new(
        blocklist_repo: Arc<dyn BlocklistRepository>,
        blocked_ip_repo: Arc<dyn BlockedIpRepository>,
        resolver: Arc<dyn DomainResolver>,
        filter: Arc<dyn PacketFilterEnginePort>,
    ) -> Self {
        Self {
            blocklist_repo,
            blocked_ip_repo,
            resolver,
            filter,
        }
    }

    pub async fn execute(&self, critical: &CriticalProtectionSet) -> Result<usize, DomainError> {
        let domains = self.blocklist_repo.get_all().await?;
        let mut resolved: HashSet<(std::net::Ipv4Addr, Arc<str>)> = HashSet::new();

        for d in &domains {
            match self.resolver.resolve(&d.domain).await {
                Ok(ips) => {
                    for ip in ips {
                        resolved.insert((ip, d.domain.clone()));
                    }
                }
                Err(err) => {
                    warn!(domain = %d.domain, error = %err, "failed to resolve during sync");
                }
            }
        }

        let rows: Vec<BlockedIp> = resolved
            .into_iter()
            .filter(|(ip, _)| !critical.contains(ip))
            .map(|(ip, domain)| BlockedIp::authoritative(ip, domain))
            .collect();

        let count = rows.len();
        self.blocked_ip_repo.replace_authoritative(rows).await?;
        self.filter.notify_reload();

        debug!(domains = domains.len(), derived_ips = count, "blocklist sync complete");
        info!(derived_ips = count, "blocked IP set resynced");
        Ok(count)
    }
}
