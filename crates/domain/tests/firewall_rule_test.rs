use pyrewall_domain::{AppSignature, Port, Protocol};

#[test]
fn test_port_parse_number_and_any() {
    assert_eq!(Port::parse("443"), Some(Port::Number(443)));
    assert_eq!(Port::parse("ANY"), Some(Port::Any));
    assert_eq!(Port::parse("any"), Some(Port::Any));
    assert_eq!(Port::parse("not-a-port"), None);
}

#[test]
fn test_port_display() {
    assert_eq!(Port::Number(80).to_string(), "80");
    assert_eq!(Port::Any.to_string(), "ANY");
}

#[test]
fn test_protocol_parse_case_insensitive() {
    assert_eq!(Protocol::parse("tcp"), Some(Protocol::Tcp));
    assert_eq!(Protocol::parse("UDP"), Some(Protocol::Udp));
    assert_eq!(Protocol::parse("icmp"), Some(Protocol::Icmp));
    assert_eq!(Protocol::parse("garbage"), None);
}

#[test]
fn test_app_signature_star_prefix_matches() {
    let sig = AppSignature {
        id: None,
        app_name: "chrome".into(),
        pattern: "*.exe".into(),
        ip_range: None,
        protocol: Protocol::Any,
    };
    assert!(sig.matches_host("chrome.exe"));
    assert!(!sig.matches_host("chrome.dll"));
}

#[test]
fn test_app_signature_question_mark_matches_single_char() {
    let sig = AppSignature {
        id: None,
        app_name: "svc".into(),
        pattern: "svchost?.exe".into(),
        ip_range: None,
        protocol: Protocol::Any,
    };
    assert!(sig.matches_host("svchost1.exe"));
    assert!(!sig.matches_host("svchost12.exe"));
}
