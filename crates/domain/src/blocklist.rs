use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::DomainError;

/// An administrator-entered domain that the DNS proxy and packet filter
/// treat as blocked. Always stored and compared in its normalized form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockedDomain {
    pub id: Option<i64>,
    pub domain: Arc<str>,
    pub created_at: Option<String>,
}

impl BlockedDomain {
    /// Lowercases, strips scheme/path/port and validates the remaining
    /// hostname has at least one dot and no whitespace.
    ///
    /// `normalize("https://www.Youtube.com/watch?v=1") == "www.youtube.com"`
    /// `normalize("facebook.com:443/") == "facebook.com"`
    pub fn normalize(raw: &str) -> Result<String, DomainError> {
        let mut s = raw.trim().to_lowercase();

        if let Some(rest) = s.strip_prefix("https://") {
            s = rest.to_string();
        } else if let Some(rest) = s.strip_prefix("http://") {
            s = rest.to_string();
        }

        if let Some(idx) = s.find('/') {
            s.truncate(idx);
        }
        if let Some(idx) = s.find('?') {
            s.truncate(idx);
        }
        if let Some(idx) = s.find(':') {
            s.truncate(idx);
        }

        if s.is_empty() || s.contains(char::is_whitespace) || !s.contains('.') {
            return Err(DomainError::InvalidDomainName(raw.to_string()));
        }

        // A domain is alphanumeric, dots, and hyphens; wildcards ("*.foo.com")
        // are valid at the leading position only.
        let checked = s.strip_prefix("*.").unwrap_or(&s);
        let valid_chars = checked
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if !valid_chars {
            return Err(DomainError::InvalidDomainName(raw.to_string()));
        }

        Ok(s)
    }

    pub fn new(domain: Arc<str>) -> Self {
        Self {
            id: None,
            domain,
            created_at: None,
        }
    }

    /// Whether `host` matches this entry per the domain-match rule: exact
    /// match, or `host` ends with `"." + domain` (after stripping a leading
    /// `*.` wildcard from the stored entry).
    pub fn matches(&self, host: &str) -> bool {
        let d = self.domain.strip_prefix("*.").unwrap_or(&self.domain);
        host == d || host.ends_with(&format!(".{d}"))
    }
}

/// A derived or runtime-observed IPv4 deny entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockedIp {
    pub ip: std::net::Ipv4Addr,
    pub domain: Option<Arc<str>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub reason: Option<Arc<str>>,
}

impl BlockedIp {
    pub const AUTO_TEMP_REASON: &'static str = "auto-temp";

    pub fn authoritative(ip: std::net::Ipv4Addr, domain: Arc<str>) -> Self {
        Self {
            ip,
            domain: Some(domain),
            expires_at: None,
            reason: None,
        }
    }

    pub fn temporary(ip: std::net::Ipv4Addr, domain: Option<Arc<str>>, ttl_secs: i64) -> Self {
        Self {
            ip,
            domain,
            expires_at: Some(Utc::now() + chrono::Duration::seconds(ttl_secs)),
            reason: Some(Arc::from(Self::AUTO_TEMP_REASON)),
        }
    }

    pub fn is_authoritative(&self) -> bool {
        self.expires_at.is_none()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(exp) if exp <= now)
    }
}

/// The set of IPv4 addresses that must never be inserted into `BlockedIp`:
/// loopback, the unspecified address, the detected default gateway, and a
/// fixed list of well-known public resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalProtectionSet {
    ips: Vec<std::net::Ipv4Addr>,
}

impl CriticalProtectionSet {
    pub const WELL_KNOWN_RESOLVERS: [std::net::Ipv4Addr; 4] = [
        std::net::Ipv4Addr::new(8, 8, 8, 8),
        std::net::Ipv4Addr::new(1, 1, 1, 1),
        std::net::Ipv4Addr::new(9, 9, 9, 9),
        std::net::Ipv4Addr::new(208, 67, 222, 222),
    ];

    pub fn new(gateway: Option<std::net::Ipv4Addr>) -> Self {
        let mut ips = vec![
            std::net::Ipv4Addr::new(127, 0, 0, 1),
            std::net::Ipv4Addr::new(0, 0, 0, 0),
        ];
        ips.extend(Self::WELL_KNOWN_RESOLVERS);
        if let Some(gw) = gateway {
            ips.push(gw);
        }
        Self { ips }
    }

    pub fn contains(&self, ip: &std::net::Ipv4Addr) -> bool {
        self.ips.contains(ip)
    }
}
