// Route exports
pub mod admin;
pub mod filters;
pub mod properties;

use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use crate::core::Searcher;
use crate::models::{ErrorResponse, HealthResponse, Property};
use crate::services::{CacheKey, CacheManager, PostgresClient, PostgresError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    /// Listing cache; the service runs without one if Redis is unavailable
    pub cache: Option<Arc<CacheManager>>,
    pub searcher: Searcher,
}

impl AppState {
    /// Fetch every listing, going through the cache when one is configured
    pub async fn all_properties(&self) -> Result<Vec<Property>, PostgresError> {
        let key = CacheKey::all_properties();

        if let Some(cache) = &self.cache {
            match cache.get_properties(&key).await {
                Ok(cached) => return Ok(Vec::clone(&cached)),
                Err(e) => tracing::trace!("Listing cache unavailable: {}", e),
            }
        }

        let properties = self.postgres.list_properties().await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put_properties(&key, &properties).await {
                tracing::warn!("Failed to cache listings: {}", e);
            }
        }

        Ok(properties)
    }

    /// Drop cached listings after a write
    pub async fn invalidate_listings(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.invalidate_listings().await {
                tracing::warn!("Failed to invalidate listing cache: {}", e);
            }
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(properties::configure)
            .configure(filters::configure)
            .configure(admin::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Render malformed JSON bodies with the standard error shape
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let response = bad_request("invalid_json", format!("Invalid JSON: {}", err));
    error::InternalError::from_response(err, response).into()
}

/// Render malformed query strings with the standard error shape
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    let response = bad_request("invalid_query", format!("Invalid query: {}", err));
    error::InternalError::from_response(err, response).into()
}

pub(crate) fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error, message, 400))
}

pub(crate) fn forbidden(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ErrorResponse::new("Forbidden", message, 403))
}

pub(crate) fn not_found(message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not found", message, 404))
}

pub(crate) fn internal_error(error: &str, err: &PostgresError) -> HttpResponse {
    tracing::error!("{}: {}", error, err);
    HttpResponse::InternalServerError().json(ErrorResponse::new(error, err.to_string(), 500))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_error_helpers_status_and_body() {
        let response = not_found("property 4 does not exist");
        assert_eq!(response.status(), 404);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["message"], "property 4 does not exist");

        assert_eq!(bad_request("Validation failed", "bad").status(), 400);
        assert_eq!(forbidden("nope").status(), 403);
    }
}
