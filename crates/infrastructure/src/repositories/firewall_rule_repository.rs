use async_trait::async_trait;
use pyrewall_application::ports::FirewallRuleRepository;
use pyrewall_domain::{DomainError, FirewallRule, Port, Protocol, RuleAction};
use sqlx::{Row, SqlitePool};

pub struct SqliteFirewallRuleRepository {
    write: SqlitePool,
    read: SqlitePool,
}

impl SqliteFirewallRuleRepository {
    pub fn new(write: SqlitePool, read: SqlitePool) -> Self {
        Self { write, read }
    }

    fn row_to_rule(row: sqlx::sqlite::SqliteRow) -> Result<FirewallRule, DomainError> {
        let ip_str: String = row.get("ip");
        let port_str: String = row.get("port");
        let protocol_str: String = row.get("protocol");
        let action_str: String = row.get("action");

        Ok(FirewallRule {
            id: Some(row.get::<i64, _>("id")),
            ip: ip_str
                .parse()
                .map_err(|_| DomainError::InvalidIpAddress(ip_str.clone()))?,
            port: Port::parse(&port_str)
                .ok_or_else(|| DomainError::ParseMalformed(format!("firewall_rules.port = {port_str}")))?,
            protocol: Protocol::parse(&protocol_str)
                .ok_or_else(|| DomainError::ParseMalformed(format!("firewall_rules.protocol = {protocol_str}")))?,
            action: match action_str.as_str() {
                "BLOCK" => RuleAction::Block,
                "ALLOW" => RuleAction::Allow,
                _ => return Err(DomainError::ParseMalformed(format!("firewall_rules.action = {action_str}"))),
            },
        })
    }
}

#[async_trait]
impl FirewallRuleRepository for SqliteFirewallRuleRepository {
    async fn create(&self, rule: FirewallRule) -> Result<FirewallRule, DomainError> {
        let action_str = match rule.action {
            RuleAction::Block => "BLOCK",
            RuleAction::Allow => "ALLOW",
        };

        let result = sqlx::query(
            "INSERT INTO firewall_rules (ip, port, protocol, action) VALUES (?, ?, ?, ?)",
        )
        .bind(rule.ip.to_string())
        .bind(rule.port.to_string())
        .bind(rule.protocol.as_str())
        .bind(action_str)
        .execute(&self.write)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(FirewallRule {
            id: Some(result.last_insert_rowid()),
            ..rule
        })
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM firewall_rules WHERE id = ?")
            .bind(id)
            .execute(&self.write)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("firewall rule {id} not found")));
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<FirewallRule>, DomainError> {
        let rows = sqlx::query("SELECT id, ip, port, protocol, action FROM firewall_rules")
            .fetch_all(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_rule).collect()
    }
}
