use pyrewall_domain::{AppSignature, CriticalProtectionSet};
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// The filter thread's in-memory caches. Replaced wholesale under an
/// `ArcSwap` by the background maintenance steps; the capture loop only
/// ever reads a snapshot.
#[derive(Debug, Clone)]
pub struct FilterState {
    pub blocked_domains: Arc<[Arc<str>]>,
    pub blocked_ips: Arc<HashSet<Ipv4Addr>>,
    pub app_signatures: Arc<[AppSignature]>,
    /// IPs of administrator-blocked devices. Checked against both `src_ip`
    /// and `dst_ip` so blocking does not depend solely on the host-level
    /// ARP/OS-firewall side effects in `BlockDeviceUseCase`.
    pub blocked_devices: Arc<HashSet<Ipv4Addr>>,
    pub critical: Arc<CriticalProtectionSet>,
}

impl Default for FilterState {
    /// An empty snapshot with no gateway detected yet. Replaced by the
    /// filter thread's first maintenance pass before capture starts.
    fn default() -> Self {
        Self {
            blocked_domains: Arc::from(Vec::new()),
            blocked_ips: Arc::new(HashSet::new()),
            app_signatures: Arc::from(Vec::new()),
            blocked_devices: Arc::new(HashSet::new()),
            critical: Arc::new(CriticalProtectionSet::new(None)),
        }
    }
}

impl FilterState {
    /// `h == d` or `h` ends with `"." + d"`, matching the wildcard-stripped
    /// domain-match rule shared with the DNS proxy.
    pub fn domain_match(&self, host: &str) -> bool {
        self.blocked_domains.iter().any(|d| {
            let d = d.strip_prefix("*.").unwrap_or(d);
            host == d || host.ends_with(&format!(".{d}"))
        })
    }

    /// Case-insensitive substring scan used as a fallback when no host
    /// could be extracted from the payload.
    pub fn payload_contains_blocked_domain(&self, payload: &[u8]) -> bool {
        let text = String::from_utf8_lossy(payload).to_lowercase();
        self.blocked_domains.iter().any(|d| text.contains(d.as_ref()))
    }

    pub fn app_signature_match(&self, host: &str) -> Option<&AppSignature> {
        self.app_signatures.iter().find(|sig| sig.matches_host(host))
    }

    pub fn is_blocked_ip(&self, ip: &Ipv4Addr) -> bool {
        self.blocked_ips.contains(ip)
    }

    pub fn is_blocked_device(&self, ip: &Ipv4Addr) -> bool {
        self.blocked_devices.contains(ip)
    }
}
