//! Redirect endpoint handler.

use actix_web::{get, web, HttpResponse};

use crate::errors::AppError;
use crate::services::Shortener;

/// Redirect to the URL behind an alias
///
/// Public: anyone holding the alias may follow it.
#[get("/r/{alias}")]
pub(super) async fn redirect_to_url(
    shortener: web::Data<Shortener>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let alias = path.into_inner();

    let url = shortener
        .find_full_url(&alias)?
        .ok_or_else(|| AppError::alias_not_found(&alias))?;

    shortener.record_redirect();
    log::info!("Redirecting {} -> {}", alias, url);

    Ok(HttpResponse::MovedPermanently()
        .append_header(("Location", url))
        .finish())
}
