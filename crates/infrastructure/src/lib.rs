//! Pyrewall Infrastructure Layer
//!
//! Concrete adapters for every application-layer port: SQLite repositories,
//! the hickory-backed resolver and DNS proxy, and the WinDivert-backed
//! packet filter engine.

pub mod database;
pub mod dns;
pub mod install;
pub mod packet;
pub mod repositories;
pub mod system;
