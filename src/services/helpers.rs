//! Shared utilities used across the service layer.
//!
//! Alias generation, password hashing and session token handling.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use nanoid::nanoid;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::constants::{ALIAS_ALPHABET, SESSION_TOKEN_PREFIX, SESSION_TOKEN_RANDOM_LENGTH};
use crate::errors::AppError;

/// Generate a random alias using nanoid
pub fn generate_alias(length: usize) -> String {
    nanoid!(length, &ALIAS_ALPHABET)
}

/// Hash a password with argon2id and a random salt, as a PHC string
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::error!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

lazy_static::lazy_static! {
    /// Hash checked when the email is not registered
    static ref DUMMY_PASSWORD_HASH: String =
        hash_password("alias-shortener-unregistered").unwrap_or_default();
}

/// Run one argon2 verification for an unregistered email; always false.
///
/// Keeps the unknown-email path as slow as a wrong password.
pub fn verify_unknown_user_password(password: &str) -> bool {
    verify_password(password, &DUMMY_PASSWORD_HASH);
    false
}

/// Generate a new session token with the ask_ prefix
pub fn generate_session_token() -> String {
    let mut rng = rand::thread_rng();
    let token: String = (0..SESSION_TOKEN_RANDOM_LENGTH)
        .map(|_| ALIAS_ALPHABET[rng.gen_range(0..ALIAS_ALPHABET.len())])
        .collect();
    format!("{}{}", SESSION_TOKEN_PREFIX, token)
}

/// Hash a session token using SHA-256
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
