// Route exports
pub mod applications;
pub mod opportunities;

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use std::time::Duration;

use crate::core::OpportunityRanker;
use crate::models::ErrorResponse;
use crate::services::{AuthToken, CacheManager, VolunteerApiClient, VolunteerApiError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<VolunteerApiClient>,
    pub cache: Arc<CacheManager>,
    pub ranker: OpportunityRanker,
    pub geolocation_timeout: Duration,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(opportunities::configure)
            .configure(applications::configure),
    );
}

/// Bearer token from the `Authorization` header, if any
pub fn bearer_token(req: &HttpRequest) -> Option<AuthToken> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(AuthToken::new)
}

pub(crate) fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: 400,
    })
}

pub(crate) fn missing_token() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        error: "Unauthorized".to_string(),
        message: "A bearer token is required".to_string(),
        status_code: 401,
    })
}

/// Translate an upstream failure into a response for the caller
pub(crate) fn api_error_response(context: &str, err: &VolunteerApiError) -> HttpResponse {
    match err {
        VolunteerApiError::NotFound(what) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: what.clone(),
            status_code: 404,
        }),
        VolunteerApiError::Unauthorized => HttpResponse::Unauthorized().json(ErrorResponse {
            error: "Unauthorized".to_string(),
            message: err.to_string(),
            status_code: 401,
        }),
        _ => {
            tracing::error!("{}: {}", context, err);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: context.to_string(),
                message: err.to_string(),
                status_code: 502,
            })
        }
    }
}
