//! Test utilities and helpers.
//!
//! Provides common test infrastructure used across multiple test modules.
//! This module is only compiled when running tests.

#![cfg(test)]

use crate::cache::AppCache;
use crate::config::Config;
use crate::constants::TEST_PASSWORD;
use crate::services::Shortener;
use crate::store::Stores;

/// URI of a fresh, private in-memory SQLite database.
///
/// Every pool opened on the same URI shares the database, as long as one
/// connection stays open.
pub fn unique_memory_db_url() -> String {
    format!(
        "file:test-{}?mode=memory&cache=shared",
        nanoid::nanoid!(16, &crate::constants::ALIAS_ALPHABET)
    )
}

/// Create a default test configuration.
pub fn test_config() -> Config {
    Config::default()
}

/// Service over fresh in-memory stores.
pub fn test_shortener() -> Shortener {
    Shortener::new(Stores::memory(), AppCache::default())
}

/// Service over a fresh SQLite database.
pub fn sqlite_shortener() -> Shortener {
    let stores = Stores::sqlite(&unique_memory_db_url()).expect("Failed to open test database");
    Shortener::new(stores, AppCache::default())
}

/// Register a user with `TEST_PASSWORD` and return a session token for them.
pub fn signed_in_user(shortener: &Shortener, email: &str) -> String {
    shortener
        .create_new_user(email, TEST_PASSWORD)
        .expect("Failed to create test user");
    shortener
        .sign_in(email, TEST_PASSWORD)
        .expect("Failed to sign in test user")
}
