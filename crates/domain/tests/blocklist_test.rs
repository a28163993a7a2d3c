use pyrewall_domain::blocklist::{BlockedDomain, BlockedIp, CriticalProtectionSet};
use std::net::Ipv4Addr;

#[test]
fn test_normalize_strips_scheme_path_query() {
    assert_eq!(
        BlockedDomain::normalize("https://www.Youtube.com/watch?v=1").unwrap(),
        "www.youtube.com"
    );
}

#[test]
fn test_normalize_strips_port_and_trailing_slash() {
    assert_eq!(
        BlockedDomain::normalize("facebook.com:443/").unwrap(),
        "facebook.com"
    );
}

#[test]
fn test_normalize_rejects_non_domain() {
    assert!(BlockedDomain::normalize("not a domain").is_err());
}

#[test]
fn test_normalize_rejects_no_dot() {
    assert!(BlockedDomain::normalize("localhost").is_err());
}

#[test]
fn test_domain_match_exact_and_subdomain() {
    let d = BlockedDomain::new("facebook.com".into());
    assert!(d.matches("facebook.com"));
    assert!(d.matches("www.facebook.com"));
    assert!(!d.matches("notfacebook.com"));
}

#[test]
fn test_wildcard_domain_excludes_bare_root() {
    let d = BlockedDomain::new("*.facebook.com".into());
    assert!(d.matches("www.facebook.com"));
    assert!(!d.matches("facebook.com"));
}

#[test]
fn test_critical_protection_set_contains_gateway_and_resolvers() {
    let gateway = Ipv4Addr::new(192, 168, 137, 1);
    let set = CriticalProtectionSet::new(Some(gateway));

    assert!(set.contains(&gateway));
    assert!(set.contains(&Ipv4Addr::new(127, 0, 0, 1)));
    assert!(set.contains(&Ipv4Addr::new(8, 8, 8, 8)));
    assert!(!set.contains(&Ipv4Addr::new(93, 184, 216, 34)));
}

#[test]
fn test_blocked_ip_expiry() {
    let ip = BlockedIp::temporary(Ipv4Addr::new(1, 2, 3, 4), None, -1);
    assert!(ip.is_expired_at(chrono::Utc::now()));
    assert!(!ip.is_authoritative());
}
