use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Admin-managed IP/port/protocol rule.
///
/// Open Question #1 (see DESIGN.md): this entity is round-tripped through
/// the repository but intentionally not consulted by the packet pipeline —
/// its intended override/supplement semantics were never specified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirewallRule {
    pub id: Option<i64>,
    pub ip: Ipv4Addr,
    pub port: Port,
    pub protocol: Protocol,
    pub action: RuleAction,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Port {
    Any,
    Number(u16),
}

impl Port {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("any") {
            return Some(Port::Any);
        }
        s.parse::<u16>().ok().map(Port::Number)
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Port::Any => write!(f, "ANY"),
            Port::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
    Any,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Icmp => "ICMP",
            Protocol::Any => "ANY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TCP" => Some(Protocol::Tcp),
            "UDP" => Some(Protocol::Udp),
            "ICMP" => Some(Protocol::Icmp),
            "ANY" => Some(Protocol::Any),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RuleAction {
    Block,
    Allow,
}
