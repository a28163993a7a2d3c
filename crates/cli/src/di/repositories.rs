use pyrewall_application::ports::{
    AppSignatureRepository, BlockedIpRepository, BlocklistRepository, DeviceRepository,
    FirewallRuleRepository, HistoryRepository, UserRepository,
};
use pyrewall_infrastructure::database::Databases;
use pyrewall_infrastructure::repositories::{
    SqliteAppSignatureRepository, SqliteBlockedIpRepository, SqliteBlocklistRepository,
    SqliteDeviceRepository, SqliteFirewallRuleRepository, SqliteHistoryRepository,
    SqliteUserRepository,
};
use std::sync::Arc;

/// Concrete SQLite-backed repositories, one per application-layer port,
/// wired to their owning logical database's write/read pool pair.
pub struct Repositories {
    pub blocklist: Arc<dyn BlocklistRepository>,
    pub blocked_ip: Arc<dyn BlockedIpRepository>,
    pub app_signature: Arc<dyn AppSignatureRepository>,
    pub firewall_rule: Arc<dyn FirewallRuleRepository>,
    pub device: Arc<dyn DeviceRepository>,
    pub user: Arc<dyn UserRepository>,
    pub history: Arc<dyn HistoryRepository>,
}

impl Repositories {
    pub fn build(databases: &Databases) -> Self {
        let firewall = &databases.firewall;
        Self {
            blocklist: Arc::new(SqliteBlocklistRepository::new(
                firewall.write.clone(),
                firewall.read.clone(),
            )),
            blocked_ip: Arc::new(SqliteBlockedIpRepository::new(
                firewall.write.clone(),
                firewall.read.clone(),
            )),
            app_signature: Arc::new(SqliteAppSignatureRepository::new(
                firewall.write.clone(),
                firewall.read.clone(),
            )),
            firewall_rule: Arc::new(SqliteFirewallRuleRepository::new(
                firewall.write.clone(),
                firewall.read.clone(),
            )),
            device: Arc::new(SqliteDeviceRepository::new(
                firewall.write.clone(),
                firewall.read.clone(),
            )),
            user: Arc::new(SqliteUserRepository::new(
                databases.users.write.clone(),
                databases.users.read.clone(),
            )),
            history: Arc::new(SqliteHistoryRepository::new(
                databases.general_history.write.clone(),
                databases.general_history.read.clone(),
            )),
        }
    }
}
