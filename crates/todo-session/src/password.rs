//! Argon2id password hashing
//!
//! Stored credentials are PHC strings (`$argon2id$v=19$...`). Anything that
//! is not an Argon2 PHC string is a plaintext password left by the browser
//! build and is compared verbatim, even when it happens to start with `$`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::AuthError;
use crate::Result;

pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

fn argon2_hash(stored: &str) -> Option<PasswordHash<'_>> {
    let parsed = PasswordHash::new(stored).ok()?;
    match parsed.algorithm.as_str() {
        "argon2id" | "argon2i" | "argon2d" => Some(parsed),
        _ => None,
    }
}

pub fn verify(password: &str, stored: &str) -> bool {
    match argon2_hash(stored) {
        Some(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        None => password == stored,
    }
}

/// Whether `stored` is a legacy plaintext credential.
pub fn needs_rehash(stored: &str) -> bool {
    argon2_hash(stored).is_none()
}
