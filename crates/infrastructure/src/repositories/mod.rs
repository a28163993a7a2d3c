pub mod app_signature_repository;
pub mod blocked_ip_repository;
pub mod blocklist_repository;
pub mod device_repository;
pub mod firewall_rule_repository;
pub mod history_repository;
pub mod user_repository;

pub use app_signature_repository::SqliteAppSignatureRepository;
pub use blocked_ip_repository::SqliteBlockedIpRepository;
pub use blocklist_repository::SqliteBlocklistRepository;
pub use device_repository::SqliteDeviceRepository;
pub use firewall_rule_repository::SqliteFirewallRuleRepository;
pub use history_repository::SqliteHistoryRepository;
pub use user_repository::SqliteUserRepository;
