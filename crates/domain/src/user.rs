use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

/// An administration-surface account. `password` holds the three-field
/// PBKDF2 string, never the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: Arc<str>,
    pub password: Arc<str>,
    pub role: Role,
}

impl User {
    pub const DEFAULT_ADMIN_USERNAME: &'static str = "admin";
    pub const DEFAULT_ADMIN_PASSWORD: &'static str = "password";
}
