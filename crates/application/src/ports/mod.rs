pub mod app_signature_repository;
pub mod arp_reader;
pub mod blocked_ip_repository;
pub mod blocklist_repository;
pub mod device_repository;
pub mod dns_proxy;
pub mod firewall_rule_repository;
pub mod history_repository;
pub mod packet_filter_engine;
pub mod resolver;
pub mod user_repository;

pub use app_signature_repository::AppSignatureRepository;
pub use arp_reader::{ArpEntry, ArpReader, DeviceEnrichment, GatewayDetector};
pub use blocked_ip_repository::BlockedIpRepository;
pub use blocklist_repository::BlocklistRepository;
pub use device_repository::DeviceRepository;
pub use dns_proxy::DnsProxyPort;
pub use firewall_rule_repository::FirewallRuleRepository;
pub use history_repository::HistoryRepository;
pub use packet_filter_engine::PacketFilterEnginePort;
pub use resolver::DomainResolver;
pub use user_repository::UserRepository;
