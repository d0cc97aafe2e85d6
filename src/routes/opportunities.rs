use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::core::{acquire_location, partition_by_date, ClientLocation, LocationOutcome};
use crate::models::{
    ApplicantStatusRequest, ApplicantStatusUpdate, HealthResponse, NewOpportunityRequest,
    Opportunity, OpportunityDetailResponse, OpportunityListResponse, OpportunityQuery,
    PostedOpportunitiesResponse, RankedOpportunityView, StatusUpdateResponse,
};
use crate::routes::{api_error_response, bad_request, bearer_token, missing_token, AppState};
use crate::services::{CacheKey, VolunteerApiError};

/// Configure all opportunity-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/opportunities", web::get().to(list_opportunities))
        .route("/opportunities", web::post().to(create_opportunity))
        .route("/opportunities/{id}", web::get().to(get_opportunity))
        .route(
            "/opportunities/{id}/applicants",
            web::put().to(update_applicant_status),
        )
        .route(
            "/users/{id}/opportunities",
            web::get().to(user_opportunities),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: state.cache.stats(),
    })
}

/// Public listing, served from cache when possible
async fn load_listing(state: &AppState) -> Result<Vec<Opportunity>, VolunteerApiError> {
    let key = CacheKey::opportunities();
    if let Ok(cached) = state.cache.get::<Vec<Opportunity>>(&key).await {
        return Ok(cached);
    }

    let opportunities = state.api.list_opportunities().await?;
    if let Err(e) = state.cache.set(&key, &opportunities).await {
        tracing::warn!("Failed to cache opportunity listing: {}", e);
    }

    Ok(opportunities)
}

/// Filtered opportunity listing
///
/// GET /api/v1/opportunities?search=&category=&district=&status=&radius=&lat=&lng=&geo_error=
///
/// `category`, `district` and `status` accept "All" to disable the filter.
/// `radius` is in kilometers, 0 disables it. The browser relays its
/// geolocation result through `lat`/`lng` or `geo_error`.
async fn list_opportunities(
    state: web::Data<AppState>,
    query: web::Query<OpportunityQuery>,
) -> impl Responder {
    let request_id = uuid::Uuid::new_v4();

    if let Err(errors) = query.validate() {
        tracing::info!("[{}] Invalid listing query: {:?}", request_id, errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let criteria = match query.to_criteria() {
        Ok(criteria) => criteria,
        Err(e) => return bad_request("Invalid filter", e.to_string()),
    };

    let opportunities = match load_listing(&state).await {
        Ok(opportunities) => opportunities,
        Err(e) => return api_error_response("Failed to fetch opportunities", &e),
    };

    let outcome = if query.has_location_input() || criteria.radius_km > 0.0 {
        let client = ClientLocation::new(query.lat, query.lng, query.geo_error.as_deref());
        acquire_location(&client, state.geolocation_timeout).await
    } else {
        LocationOutcome::default()
    };

    let criteria = match outcome.location {
        Some(location) => criteria.with_user_location(location),
        None => criteria,
    };

    let result = state.ranker.rank(&opportunities, &criteria);

    tracing::info!(
        "[{}] Returning {} of {} opportunities (radius applied: {})",
        request_id,
        result.opportunities.len(),
        result.total_available,
        result.radius_applied
    );

    HttpResponse::Ok().json(OpportunityListResponse {
        total_results: result.opportunities.len(),
        opportunities: result
            .opportunities
            .iter()
            .map(RankedOpportunityView::from)
            .collect(),
        total_available: result.total_available,
        radius_applied: result.radius_applied,
        location_notice: outcome.notice,
    })
}

/// Opportunity detail with applicants
///
/// GET /api/v1/opportunities/{id}
async fn get_opportunity(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> impl Responder {
    let Some(token) = bearer_token(&req) else {
        return missing_token();
    };
    let opportunity_id = path.into_inner();

    match state.api.get_opportunity(&opportunity_id, &token).await {
        Ok(detail) => HttpResponse::Ok().json(OpportunityDetailResponse::from(detail)),
        Err(e) => api_error_response("Failed to fetch opportunity", &e),
    }
}

/// Post a new opportunity
///
/// POST /api/v1/opportunities
async fn create_opportunity(
    state: web::Data<AppState>,
    body: web::Json<NewOpportunityRequest>,
    req: HttpRequest,
) -> impl Responder {
    let Some(token) = bearer_token(&req) else {
        return missing_token();
    };

    if let Err(errors) = body.validate() {
        tracing::info!("Validation failed for new opportunity: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    match state.api.create_opportunity(&body, &token).await {
        Ok(opportunity) => {
            state.cache.delete(&CacheKey::opportunities()).await;
            tracing::info!("Posted opportunity {} ({})", opportunity.id, opportunity.title);
            HttpResponse::Created().json(opportunity)
        }
        Err(e) => api_error_response("Failed to create opportunity", &e),
    }
}

/// Approve or reject an applicant
///
/// PUT /api/v1/opportunities/{id}/applicants
///
/// Request body:
/// ```json
/// { "userId": "string", "status": "accepted|rejected|pending", "requesterId": "string" }
/// ```
async fn update_applicant_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ApplicantStatusRequest>,
    req: HttpRequest,
) -> impl Responder {
    let Some(token) = bearer_token(&req) else {
        return missing_token();
    };

    if let Err(errors) = body.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let update = match ApplicantStatusUpdate::try_from(&*body) {
        Ok(update) => update,
        Err(e) => return bad_request("Invalid status", e.to_string()),
    };
    let opportunity_id = path.into_inner();

    match state
        .api
        .update_applicant_status(&opportunity_id, &update, &token)
        .await
    {
        Ok(()) => {
            state.cache.delete(&CacheKey::opportunities()).await;
            HttpResponse::Ok().json(StatusUpdateResponse {
                success: true,
                user_id: update.user_id,
                status: update.status.as_str().to_string(),
            })
        }
        Err(e) => api_error_response("Failed to update applicant status", &e),
    }
}

/// Postings of one organizer split into upcoming and completed
///
/// GET /api/v1/users/{id}/opportunities
async fn user_opportunities(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> impl Responder {
    let Some(token) = bearer_token(&req) else {
        return missing_token();
    };
    let user_id = path.into_inner();

    match state.api.opportunities_posted_by(&user_id, &token).await {
        Ok(postings) => {
            let today = chrono::Local::now().date_naive();
            let split = partition_by_date(postings, today);
            HttpResponse::Ok().json(PostedOpportunitiesResponse {
                upcoming: split.upcoming,
                completed: split.completed,
            })
        }
        Err(e) => api_error_response("Failed to fetch user opportunities", &e),
    }
}
