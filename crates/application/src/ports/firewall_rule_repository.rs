use async_trait::async_trait;
use pyrewall_domain::{DomainError, FirewallRule};

#[async_trait]
pub trait FirewallRuleRepository: Send + Sync {
    async fn create(&self, rule: FirewallRule) -> Result<FirewallRule, DomainError>;

    async fn delete(&self, id: i64) -> Result<(), DomainError>;

    async fn get_all(&self) -> Result<Vec<FirewallRule>, DomainError>;
}
