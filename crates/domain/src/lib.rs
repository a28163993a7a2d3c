//! Pyrewall Domain Layer

pub mod app_signature;
pub mod blocklist;
pub mod config;
pub mod device;
pub mod errors;
pub mod firewall_rule;
pub mod history;
pub mod user;
pub mod validators;

pub use app_signature::AppSignature;
pub use blocklist::{BlockedDomain, BlockedIp, CriticalProtectionSet};
pub use config::{CliOverrides, Config, ConfigError};
pub use device::{BlockedDevice, LiveDevice};
pub use errors::DomainError;
pub use firewall_rule::{FirewallRule, Port, Protocol, RuleAction};
pub use history::HistoryEntry;
pub use user::{Role, User};
