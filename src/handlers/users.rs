//! Account endpoint handlers: signup, sign-in and sign-out.

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::models::{CredentialsRequest, MessageResponse, SignInResponse, SignupRequest};
use crate::services::Shortener;

/// Register a new user
#[post("/signup")]
pub(super) async fn signup(
    shortener: web::Data<Shortener>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::validation(format!("Invalid input: {}", e)))?;

    shortener.create_new_user(&body.email, &body.password)?;

    Ok(HttpResponse::Created().finish())
}

/// Exchange credentials for a session token
#[post("/signin")]
pub(super) async fn signin(
    shortener: web::Data<Shortener>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::validation(format!("Invalid input: {}", e)))?;

    let token = shortener.sign_in(&body.email, &body.password)?;

    Ok(HttpResponse::Ok().json(SignInResponse { token }))
}

/// End the caller's session
#[post("/signout")]
pub(super) async fn signout(
    user: AuthenticatedUser,
    shortener: web::Data<Shortener>,
) -> Result<HttpResponse, AppError> {
    shortener.sign_out(&user.token);

    Ok(HttpResponse::Ok().json(MessageResponse::new("Signed out successfully")))
}
