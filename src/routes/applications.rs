use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::models::ApplicationRequest;
use crate::routes::{api_error_response, bad_request, bearer_token, missing_token, AppState};
use crate::services::CacheKey;

/// Configure application routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/applications", web::post().to(apply));
}

/// Apply to an opportunity
///
/// POST /api/v1/applications
///
/// Request body:
/// ```json
/// {
///   "opportunityId": "string",
///   "userId": "string",
///   "fullName": "string",
///   "phoneNumber": "string",
///   "relevantExperience": "string",
///   "additionalMessage": "string"
/// }
/// ```
async fn apply(
    state: web::Data<AppState>,
    body: web::Json<ApplicationRequest>,
    req: HttpRequest,
) -> impl Responder {
    let Some(token) = bearer_token(&req) else {
        return missing_token();
    };

    if let Err(errors) = body.validate() {
        tracing::info!(
            "Validation failed for application to {}: {:?}",
            body.opportunity_id,
            errors
        );
        return bad_request("Validation failed", errors.to_string());
    }

    match state.api.apply(&body, &token).await {
        Ok(application) => {
            // applied counts in the cached listing are now stale
            state.cache.delete(&CacheKey::opportunities()).await;
            tracing::info!(
                "User {} applied to opportunity {}",
                application.user_id,
                application.opportunity_id
            );
            HttpResponse::Created().json(application)
        }
        Err(e) => api_error_response("Failed to submit application", &e),
    }
}
