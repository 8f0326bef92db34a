//! Data models and DTOs (Data Transfer Objects) for the alias service.
//!
//! Contains structures for stored entities and API request/response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Stored Entities
// ============================================================================

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Email address, the user's identity
    pub email: String,
    /// Argon2 PHC string of the user's password
    pub password_hash: String,
}

impl User {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// A stored alias together with its destination and owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    pub alias: String,
    pub url: String,
    /// Email of the user who created the alias
    pub owner: String,
}

// ============================================================================
// API Request DTOs
// ============================================================================

/// Request body for signup and sign-in
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email is too long (max 255 characters)"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
}

/// Request body for signup; stricter password rules than sign-in
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email is too long (max 255 characters)"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Request body for creating a new alias
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten (must be a valid URL)
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 2048, message = "URL is too long (max 2048 characters)"))]
    pub url: String,

    /// Optional alias; absent or empty means a generated one
    #[serde(default)]
    #[validate(length(max = 32, message = "Alias must be at most 32 characters"))]
    #[validate(custom = "validate_alias")]
    pub alias: Option<String>,
}

impl ShortenRequest {
    /// The requested alias, with "" standing for "generate one"
    pub fn requested_alias(&self) -> &str {
        self.alias.as_deref().unwrap_or("")
    }
}

/// Aliases may contain letters, numbers, underscore and hyphen
fn validate_alias(alias: &str) -> Result<(), validator::ValidationError> {
    lazy_static::lazy_static! {
        static ref ALIAS_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]*$").unwrap();
    }
    if ALIAS_REGEX.is_match(alias) {
        Ok(())
    } else {
        Err(validator::ValidationError::new(
            "Alias must be alphanumeric (letters, numbers, underscore, hyphen)",
        ))
    }
}

// ============================================================================
// API Response DTOs
// ============================================================================

/// Response for a successful sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Response for a successfully created alias
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub alias: String,
    /// Full redirect URL for the alias
    pub shortened_url: String,
}

/// Response listing the caller's aliases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasListResponse {
    pub total: usize,
    /// Mapping alias -> destination URL
    pub aliases: BTreeMap<String, String>,
}

impl AliasListResponse {
    pub fn new(aliases: BTreeMap<String, String>) -> Self {
        Self {
            total: aliases.len(),
            aliases,
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code (for programmatic handling)
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Generic success message response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
