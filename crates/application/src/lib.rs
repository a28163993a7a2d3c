//! Pyrewall Application Layer
//!
//! Defines the ports (trait boundaries) the infrastructure layer implements,
//! and the use cases that compose them. Nothing in this crate knows about
//! SQLite, WinDivert, or any other concrete adapter.

pub mod credentials;
pub mod ports;
pub mod use_cases;
