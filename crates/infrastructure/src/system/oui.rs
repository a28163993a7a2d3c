use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::Resolver;
use pyrewall_application::ports::DeviceEnrichment;
use pyrewall_domain::config::DnsConfig;
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use tracing::{debug, warn};

/// A small, fixed table of well-known OUI prefixes. Not exhaustive — real
/// IEEE registries run to hundreds of thousands of entries — but enough to
/// label the common consumer/IoT vendors seen on a home or small-office LAN.
const OUI_TABLE: &[(&str, &str)] = &[
    ("00:1A:11", "Google"),
    ("3C:5A:B4", "Google"),
    ("F4:F5:D8", "Google"),
    ("AC:BC:32", "Apple"),
    ("F0:18:98", "Apple"),
    ("E4:98:D6", "Apple"),
    ("B8:27:EB", "Raspberry Pi Foundation"),
    ("DC:A6:32", "Raspberry Pi Foundation"),
    ("00:17:88", "Philips (Hue)"),
    ("18:B4:30", "Nest Labs"),
    ("7C:64:56", "Espressif (IoT)"),
    ("24:6F:28", "Espressif (IoT)"),
    ("00:50:56", "VMware"),
    ("08:00:27", "Oracle VirtualBox"),
];

/// Resolves OUI vendors from the fixed table and reverse hostnames via a
/// dedicated DNS resolver pointed at the configured upstream.
pub struct SystemDeviceEnrichment {
    table: HashMap<String, &'static str>,
    resolver: Resolver<TokioConnectionProvider>,
}

impl SystemDeviceEnrichment {
    pub fn new(dns: &DnsConfig) -> Self {
        let table = OUI_TABLE
            .iter()
            .map(|(prefix, vendor)| (prefix.to_uppercase(), *vendor))
            .collect();

        let resolver = match dns.upstream.parse::<SocketAddr>() {
            Ok(addr) => {
                let nameservers = NameServerConfigGroup::from_ips_clear(&[addr.ip()], addr.port(), true);
                Resolver::builder_with_config(
                    ResolverConfig::from_parts(None, vec![], nameservers),
                    TokioConnectionProvider::default(),
                )
                .build()
            }
            Err(e) => {
                warn!(upstream = %dns.upstream, error = %e, "invalid DNS upstream, falling back to system config");
                Resolver::builder_with_config(ResolverConfig::default(), TokioConnectionProvider::default()).build()
            }
        };

        Self { table, resolver }
    }

    fn normalize_prefix(mac: &str) -> Option<String> {
        let sep = if mac.contains(':') {
            ':'
        } else if mac.contains('-') {
            '-'
        } else {
            return None;
        };
        let parts: Vec<&str> = mac.split(sep).collect();
        if parts.len() != 6 {
            return None;
        }
        Some(format!("{}:{}:{}", parts[0], parts[1], parts[2]).to_uppercase())
    }
}

#[async_trait]
impl DeviceEnrichment for SystemDeviceEnrichment {
    fn lookup_vendor(&self, mac: &str) -> Option<String> {
        let prefix = Self::normalize_prefix(mac)?;
        self.table.get(prefix.as_str()).map(|v| v.to_string())
    }

    async fn reverse_hostname(&self, ip: Ipv4Addr) -> Option<String> {
        match self.resolver.reverse_lookup(ip.into()).await {
            Ok(lookup) => lookup.iter().next().map(|name| name.to_string()),
            Err(e) => {
                debug!(%ip, error = %e, "reverse hostname lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_colon_and_hyphen_separated_mac() {
        assert_eq!(
            SystemDeviceEnrichment::normalize_prefix("ac:bc:32:11:22:33"),
            Some("AC:BC:32".to_string())
        );
        assert_eq!(
            SystemDeviceEnrichment::normalize_prefix("AC-BC-32-11-22-33"),
            Some("AC:BC:32".to_string())
        );
    }

    #[test]
    fn rejects_malformed_mac() {
        assert_eq!(SystemDeviceEnrichment::normalize_prefix("not-a-mac"), None);
    }
}
