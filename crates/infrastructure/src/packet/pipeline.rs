use super::capture::{CapturedPacket, PacketProtocol};
use super::sni;
use super::state::FilterState;
use std::net::Ipv4Addr;
use std::time::Duration;

const DOH_FRAGMENTS: &[&str] = &[
    "dns.google",
    "cloudflare-dns.com",
    "mozilla.cloudflare-dns.com",
    "one.one.one.one",
];

/// What the capture loop should do with a packet once the decision pipeline
/// has run.
pub enum Decision {
    Reinject,
    Drop,
    /// Step 1 specifically: counted against the per-IP drop aggregate.
    DropIpDeny(Ipv4Addr),
    DropAndTempBlock {
        ip: Ipv4Addr,
        domain: Option<std::sync::Arc<str>>,
        ttl: Duration,
    },
}

/// Runs the eight-step per-packet decision pipeline (first match wins).
/// `temp_block_ttl` is the configured TTL applied to IPs observed via an
/// application-signature or domain-match side effect (default 300 s).
pub fn decide(state: &FilterState, packet: &CapturedPacket, temp_block_ttl: Duration) -> Decision {
    // 1. IP-level deny: blocked IPs, and blocked devices as either endpoint.
    if let Some(dst) = packet.dst_ip {
        if state.is_blocked_ip(&dst) || state.is_blocked_device(&dst) {
            return Decision::DropIpDeny(dst);
        }
    }
    if let Some(src) = packet.src_ip {
        if state.is_blocked_device(&src) {
            return Decision::DropIpDeny(src);
        }
    }

    // 2. QUIC hard-drop.
    if matches!(packet.protocol, PacketProtocol::Udp) && packet.dst_port == Some(443) {
        return Decision::Drop;
    }

    // 3. Host/SNI extraction.
    let host = sni::extract_host(&packet.data);

    // 4. Domain match (with payload-substring fallback when no host).
    let domain_matched = match &host {
        Some(h) => state.domain_match(h),
        None => state.payload_contains_blocked_domain(&packet.data),
    };

    // 5. DoH hard-drop.
    let text_lower = String::from_utf8_lossy(&packet.data).to_lowercase();
    if DOH_FRAGMENTS.iter().any(|f| text_lower.contains(f)) {
        return Decision::Drop;
    }

    // 6. Application signature match.
    if let Some(h) = &host {
        if let Some(_sig) = state.app_signature_match(h) {
            return match packet.dst_ip {
                Some(ip) => Decision::DropAndTempBlock {
                    ip,
                    domain: None,
                    ttl: temp_block_ttl,
                },
                None => Decision::Drop,
            };
        }
    }

    // 7. Domain match side-effect.
    if domain_matched {
        return match packet.dst_ip {
            Some(ip) => Decision::DropAndTempBlock {
                ip,
                domain: host.map(|h| h.into()),
                ttl: temp_block_ttl,
            },
            None => Decision::Drop,
        };
    }

    // 8. Default.
    Decision::Reinject
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyrewall_domain::{AppSignature, CriticalProtectionSet, Protocol};
    use std::collections::HashSet;
    use std::sync::Arc;

    const TEST_TTL: Duration = Duration::from_secs(300);

    fn packet(data: &[u8], dst_ip: Option<Ipv4Addr>, protocol: PacketProtocol, dst_port: Option<u16>) -> CapturedPacket {
        CapturedPacket {
            data: data.to_vec(),
            src_ip: None,
            dst_ip,
            protocol,
            dst_port,
        }
    }

    #[test]
    fn blocked_ip_drops_before_anything_else() {
        let ip = Ipv4Addr::new(93, 184, 216, 34);
        let mut ips = HashSet::new();
        ips.insert(ip);
        let state = FilterState {
            blocked_ips: Arc::new(ips),
            ..Default::default()
        };
        let pkt = packet(b"irrelevant", Some(ip), PacketProtocol::Tcp, Some(443));
        assert!(matches!(decide(&state, &pkt, TEST_TTL), Decision::DropIpDeny(observed) if observed == ip));
    }

    #[test]
    fn blocked_device_is_dropped_as_either_endpoint() {
        let device_ip = Ipv4Addr::new(192, 168, 137, 50);
        let mut devices = HashSet::new();
        devices.insert(device_ip);
        let state = FilterState {
            blocked_devices: Arc::new(devices),
            ..Default::default()
        };
        let pkt = CapturedPacket {
            data: b"irrelevant".to_vec(),
            src_ip: Some(device_ip),
            dst_ip: Some(Ipv4Addr::new(8, 8, 8, 8)),
            protocol: PacketProtocol::Tcp,
            dst_port: Some(443),
        };
        assert!(matches!(decide(&state, &pkt, TEST_TTL), Decision::DropIpDeny(observed) if observed == device_ip));
    }

    #[test]
    fn quic_is_hard_dropped() {
        let state = FilterState::default();
        let pkt = packet(b"", Some(Ipv4Addr::new(1, 2, 3, 4)), PacketProtocol::Udp, Some(443));
        assert!(matches!(decide(&state, &pkt, TEST_TTL), Decision::Drop));
    }

    #[test]
    fn blocked_domain_in_sni_temp_blocks_observed_ip() {
        let state = FilterState {
            blocked_domains: Arc::from(vec![Arc::from("youtube.com")]),
            ..Default::default()
        };
        let payload = b"GET / HTTP/1.1\r\nHost: www.youtube.com\r\n\r\n";
        let ip = Ipv4Addr::new(142, 250, 0, 1);
        let pkt = packet(payload, Some(ip), PacketProtocol::Tcp, Some(80));
        match decide(&state, &pkt, TEST_TTL) {
            Decision::DropAndTempBlock { ip: blocked, ttl, .. } => {
                assert_eq!(blocked, ip);
                assert_eq!(ttl, TEST_TTL);
            }
            _ => panic!("expected DropAndTempBlock"),
        }
    }

    #[test]
    fn doh_fragment_is_hard_dropped() {
        let state = FilterState::default();
        let payload = b"...cloudflare-dns.com...";
        let pkt = packet(payload, Some(Ipv4Addr::new(1, 1, 1, 1)), PacketProtocol::Tcp, Some(443));
        assert!(matches!(decide(&state, &pkt, TEST_TTL), Decision::Drop));
    }

    #[test]
    fn app_signature_match_temp_blocks() {
        let sig = AppSignature {
            id: Some(1),
            app_name: Arc::from("evil"),
            pattern: Arc::from("*.evil.example"),
            ip_range: None,
            protocol: Protocol::Tcp,
        };
        let state = FilterState {
            app_signatures: Arc::from(vec![sig]),
            ..Default::default()
        };
        let payload = b"GET / HTTP/1.1\r\nHost: app.evil.example\r\n\r\n";
        let ip = Ipv4Addr::new(10, 0, 0, 1);
        let pkt = packet(payload, Some(ip), PacketProtocol::Tcp, Some(80));
        match decide(&state, &pkt, TEST_TTL) {
            Decision::DropAndTempBlock { ip: blocked, ttl, .. } => {
                assert_eq!(blocked, ip);
                assert_eq!(ttl, TEST_TTL);
            }
            _ => panic!("expected DropAndTempBlock"),
        }
    }

    #[test]
    fn unmatched_packet_is_reinjected() {
        let state = FilterState::default();
        let pkt = packet(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n", Some(Ipv4Addr::new(8, 8, 8, 8)), PacketProtocol::Tcp, Some(80));
        assert!(matches!(decide(&state, &pkt, TEST_TTL), Decision::Reinject));
    }

    #[test]
    fn critical_protection_set_field_present() {
        let state = FilterState {
            critical: Arc::new(CriticalProtectionSet::new(None)),
            ..Default::default()
        };
        assert!(!state.is_blocked_ip(&Ipv4Addr::new(0, 0, 0, 0)));
    }
}
