//! Custom error types for the alias service.
//!
//! Implements proper error handling with automatic HTTP response conversion.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Signup attempted for an email that is already registered
    #[error("User already created: {0}")]
    UserAlreadyCreated(String),
    /// Caller-supplied alias is already taken
    #[error("Alias already exists: {0}")]
    AliasAlreadyExists(String),
    /// Alias exists but belongs to another user
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// Resource was not found
    #[error("Not found: {0}")]
    NotFound(String),
    /// No free alias was found within the retry bound
    #[error("Alias space exhausted: {0}")]
    AliasSpaceExhausted(String),
    /// Email/password pair was rejected
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
    /// Missing, unknown or expired session token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Invalid input data
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// Storage backend failure
    #[error("Storage error: {0}")]
    StorageError(String),
    /// Internal server error
    #[error("Internal error: {0}")]
    InternalError(String),
}

// ============================================================================
// Constructor Methods
// ============================================================================

impl AppError {
    /// Create a UserAlreadyCreated error for an email
    pub fn user_already_created(email: &str) -> Self {
        AppError::UserAlreadyCreated(format!("Email '{}' is already registered", email))
    }

    /// Create an AliasAlreadyExists error
    pub fn alias_taken(alias: &str) -> Self {
        AppError::AliasAlreadyExists(format!("Alias '{}' is already taken", alias))
    }

    /// Create a NotFound error for an alias
    pub fn alias_not_found(alias: &str) -> Self {
        AppError::NotFound(format!("Alias '{}' not found", alias))
    }

    /// Create a PermissionDenied error for an alias owned by someone else
    pub fn not_owner(alias: &str) -> Self {
        AppError::PermissionDenied(format!("Alias '{}' belongs to another user", alias))
    }

    /// Create an Unauthorized error for a missing token
    pub fn missing_token() -> Self {
        AppError::Unauthorized(
            "Missing session token. Provide via 'Authorization: Bearer <token>' header".into(),
        )
    }

    /// Create an Unauthorized error for an unknown or expired token
    pub fn invalid_token() -> Self {
        AppError::Unauthorized("Invalid or expired session token".into())
    }

    /// Create a ValidationError with a message
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError(message.into())
    }

    /// Create an InternalError with a message
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::InternalError(message.into())
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::UserAlreadyCreated(_) => "USER_ALREADY_CREATED",
            AppError::AliasAlreadyExists(_) => "ALIAS_ALREADY_EXISTS",
            AppError::PermissionDenied(_) => "PERMISSION_DENIED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::AliasSpaceExhausted(_) => "ALIAS_SPACE_EXHAUSTED",
            AppError::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::UserAlreadyCreated(msg)
            | AppError::AliasAlreadyExists(msg)
            | AppError::PermissionDenied(msg)
            | AppError::NotFound(msg)
            | AppError::AliasSpaceExhausted(msg)
            | AppError::InvalidCredentials(msg)
            | AppError::Unauthorized(msg)
            | AppError::ValidationError(msg)
            | AppError::StorageError(msg)
            | AppError::InternalError(msg) => msg,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UserAlreadyCreated(_) => StatusCode::CONFLICT,
            AppError::AliasAlreadyExists(_) => StatusCode::CONFLICT,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AliasSpaceExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ErrorResponse::new(self.message(), self.error_code()))
    }
}

/// Convert rusqlite errors to AppError
impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        log::error!("Database error: {:?}", err);
        AppError::StorageError(err.to_string())
    }
}

/// Convert r2d2 pool errors to AppError
impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        log::error!("Connection pool error: {:?}", err);
        AppError::StorageError(format!("Connection pool error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::user_already_created("a@b.com").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::alias_taken("short").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_owner("short").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::alias_not_found("short").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::AliasSpaceExhausted("test".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::InvalidCredentials("test".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::invalid_token().status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::validation("test").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::StorageError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::internal("test").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_display() {
        let err = AppError::alias_not_found("abc123");
        assert!(err.to_string().starts_with("Not found"));
        assert!(err.to_string().contains("abc123"));

        let err = AppError::user_already_created("a@b.com");
        assert!(err.to_string().contains("a@b.com"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::not_owner("x").error_code(), "PERMISSION_DENIED");
        assert_eq!(AppError::alias_taken("x").error_code(), "ALIAS_ALREADY_EXISTS");
        assert_eq!(
            AppError::user_already_created("x").error_code(),
            "USER_ALREADY_CREATED"
        );
    }

    #[test]
    fn test_all_error_variants_have_responses() {
        let errors = vec![
            AppError::UserAlreadyCreated("test".into()),
            AppError::AliasAlreadyExists("test".into()),
            AppError::PermissionDenied("test".into()),
            AppError::NotFound("test".into()),
            AppError::AliasSpaceExhausted("test".into()),
            AppError::InvalidCredentials("test".into()),
            AppError::Unauthorized("test".into()),
            AppError::ValidationError("test".into()),
            AppError::StorageError("test".into()),
            AppError::InternalError("test".into()),
        ];

        for err in errors {
            let response = err.error_response();
            assert!(response.status().is_client_error() || response.status().is_server_error());
        }
    }
}
