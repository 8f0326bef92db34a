//! Session token authentication.
//!
//! Provides an extractor resolving the caller's identity on protected
//! endpoints.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::errors::AppError;
use crate::services::Shortener;

/// Authenticated user extractor for protecting endpoints.
///
/// Add this to handler parameters to require authentication. The session
/// token issued by sign-in is read from the `Authorization: Bearer <token>`
/// header.
pub struct AuthenticatedUser {
    pub email: String,
    /// The bearer token the request was authenticated with
    pub token: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let shortener = match req.app_data::<web::Data<Shortener>>() {
            Some(shortener) => shortener,
            None => {
                return ready(Err(AppError::internal("Service not available")));
            }
        };

        let token = match extract_bearer_token(req) {
            Some(token) => token.to_string(),
            None => return ready(Err(AppError::missing_token())),
        };

        ready(
            shortener
                .authenticate(&token)
                .map(|email| AuthenticatedUser { email, token }),
        )
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
