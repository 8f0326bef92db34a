//! Health check and metrics endpoint handlers.

use actix_web::{get, web, HttpResponse};
use prometheus::Registry;

use crate::errors::AppError;
use crate::metrics;

/// Health check endpoint
#[get("/health")]
pub(super) async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus scrape endpoint; absent when metrics are disabled
#[get("/metrics")]
pub(super) async fn metrics_endpoint(
    registry: Option<web::Data<Registry>>,
) -> Result<HttpResponse, AppError> {
    let registry = registry.ok_or_else(|| AppError::NotFound("Metrics are disabled".into()))?;

    let body = metrics::render(&registry)
        .map_err(|e| AppError::internal(format!("Failed to encode metrics: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body))
}
