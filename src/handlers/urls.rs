//! Alias endpoint handlers: shorten, list and delete.

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::config::Config;
use crate::constants::REDIRECT_PREFIX;
use crate::errors::AppError;
use crate::models::{AliasListResponse, MessageResponse, ShortenRequest, ShortenResponse};
use crate::services::Shortener;

/// Create a new alias for the caller
#[post("/urls/shorten")]
pub(super) async fn shorten(
    user: AuthenticatedUser,
    shortener: web::Data<Shortener>,
    config: web::Data<Config>,
    body: web::Json<ShortenRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::validation(format!("Invalid input: {}", e)))?;

    let parsed = url::Url::parse(&body.url)
        .map_err(|_| AppError::validation("Invalid URL format"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::validation("Only http and https URLs can be shortened"));
    }

    let alias = shortener.create_new_alias(&user.email, &body.url, body.requested_alias())?;

    let response = ShortenResponse {
        shortened_url: format!("{}{}/{}", config.base_url, REDIRECT_PREFIX, alias),
        alias,
    };

    Ok(HttpResponse::Created().json(response))
}

/// List all aliases of the caller
#[get("/urls")]
pub(super) async fn list_aliases(
    user: AuthenticatedUser,
    shortener: web::Data<Shortener>,
) -> Result<HttpResponse, AppError> {
    let aliases = shortener.list_aliases_for_user(&user.email)?;

    Ok(HttpResponse::Ok().json(AliasListResponse::new(aliases)))
}

/// Delete one of the caller's aliases
#[delete("/delete/{alias}")]
pub(super) async fn delete_alias(
    user: AuthenticatedUser,
    shortener: web::Data<Shortener>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let alias = path.into_inner();
    shortener.delete_alias(&user.email, &alias)?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Alias deleted successfully")))
}
