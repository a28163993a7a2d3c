//! Configuration module for Pyrewall
//!
//! Configuration layers (lowest to highest precedence): compiled-in
//! defaults, `pyrewall.toml`, `PYREWALL_*` environment variables, CLI flags.

pub mod blocking;
pub mod database;
pub mod dns;
pub mod errors;
pub mod logging;
pub mod packet_filter;
pub mod root;
pub mod server;

pub use blocking::BlockingConfig;
pub use database::DatabaseConfig;
pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use packet_filter::PacketFilterConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
