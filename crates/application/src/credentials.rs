//! PBKDF2-HMAC-SHA256 password hashing in the three-field
//! `iterations$salt_hex$hash_hex` format consumed by the install bootstrap
//! and the (out-of-scope) login UI.

use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

const DEFAULT_ITERATIONS: u32 = 150_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

pub fn hash_password(plain: &str) -> String {
    hash_password_with_iterations(plain, DEFAULT_ITERATIONS)
}

pub fn hash_password_with_iterations(plain: &str, iterations: u32) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::<Hmac<Sha256>>(plain.as_bytes(), &salt, iterations, &mut hash)
        .expect("HASH_LEN is a valid PBKDF2 output length");

    format!("{iterations}${}${}", hex::encode(salt), hex::encode(hash))
}

/// Parses `stored` and recomputes the hash with its salt/iterations,
/// comparing in constant time. Malformed input verifies as `false` rather
/// than panicking.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    let Some((iterations, salt, expected)) = parse_stored(stored) else {
        return false;
    };

    let mut computed = vec![0u8; expected.len()];
    if pbkdf2::<Hmac<Sha256>>(candidate.as_bytes(), &salt, iterations, &mut computed).is_err() {
        return false;
    }

    computed.ct_eq(&expected).into()
}

fn parse_stored(stored: &str) -> Option<(u32, Vec<u8>, Vec<u8>)> {
    let mut parts = stored.splitn(3, '$');
    let iterations: u32 = parts.next()?.parse().ok()?;
    let salt = hex::decode(parts.next()?).ok()?;
    let hash = hex::decode(parts.next()?).ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((iterations, salt, hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let stored = hash_password("hunter2");
        assert!(verify_password(&stored, "hunter2"));
        assert!(!verify_password(&stored, "wrong"));
    }

    #[test]
    fn malformed_stored_string_fails_closed() {
        assert!(!verify_password("not-a-valid-format", "anything"));
        assert!(!verify_password("abc$def", "anything"));
        assert!(!verify_password("150000$zz$zz", "anything"));
    }

    #[test]
    fn produces_three_field_format() {
        let stored = hash_password("swordfish");
        let fields: Vec<&str> = stored.split('$').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], "150000");
    }
}
