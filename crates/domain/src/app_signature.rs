use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::firewall_rule::Protocol;

/// An administrator-defined glob over a Host/SNI value used to identify
/// application traffic (e.g. `*.youtube.com`).
///
/// Open Question #2 (see DESIGN.md): `ip_range`/`protocol` are stored and
/// round-tripped but not consulted by the match path, which tests only
/// `pattern` against the extracted host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppSignature {
    pub id: Option<i64>,
    pub app_name: Arc<str>,
    pub pattern: Arc<str>,
    pub ip_range: Option<Arc<str>>,
    pub protocol: Protocol,
}

impl AppSignature {
    /// Standard glob semantics: `*` matches any run of characters, `?`
    /// matches exactly one character. Matching is case-sensitive against
    /// the (already-lowercased) host.
    pub fn matches_host(&self, host: &str) -> bool {
        glob_match(&self.pattern, host)
    }
}

fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    match_from(&p, &t)
}

fn match_from(p: &[char], t: &[char]) -> bool {
    match p.first() {
        None => t.is_empty(),
        Some('*') => {
            // Try consuming zero or more characters of `t`.
            if match_from(&p[1..], t) {
                return true;
            }
            for i in 0..t.len() {
                if match_from(&p[1..], &t[i + 1..]) {
                    return true;
                }
            }
            false
        }
        Some('?') => !t.is_empty() && match_from(&p[1..], &t[1..]),
        Some(c) => !t.is_empty() && t[0] == *c && match_from(&p[1..], &t[1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        assert!(glob_match("youtube.com", "youtube.com"));
        assert!(!glob_match("youtube.com", "www.youtube.com"));
    }

    #[test]
    fn star_prefix() {
        assert!(glob_match("*.youtube.com", "video.youtube.com"));
        assert!(!glob_match("*.youtube.com", "youtube.com"));
    }

    #[test]
    fn question_mark() {
        assert!(glob_match("a?c", "abc"));
        assert!(!glob_match("a?c", "abbc"));
    }

    #[test]
    fn star_anywhere() {
        assert!(glob_match("*tiktok*", "m.tiktok.com"));
    }
}
