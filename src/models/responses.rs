use serde::{Deserialize, Serialize};

use crate::core::RankedOpportunity;
use crate::services::CacheStats;
use crate::models::domain::{Applicant, Opportunity, OpportunityDetail};

/// Opportunity as returned by the listing, with its distance from the user
#[derive(Debug, Clone, Serialize)]
pub struct RankedOpportunityView {
    #[serde(flatten)]
    pub opportunity: Opportunity,
    #[serde(rename = "distanceKm", skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl From<&RankedOpportunity<'_>> for RankedOpportunityView {
    fn from(ranked: &RankedOpportunity<'_>) -> Self {
        Self {
            opportunity: ranked.opportunity.clone(),
            distance_km: ranked.distance_km,
        }
    }
}

/// Response for the opportunity listing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct OpportunityListResponse {
    pub opportunities: Vec<RankedOpportunityView>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "totalAvailable")]
    pub total_available: usize,
    #[serde(rename = "radiusApplied")]
    pub radius_applied: bool,
    #[serde(rename = "locationNotice", skip_serializing_if = "Option::is_none")]
    pub location_notice: Option<String>,
}

/// Opportunity detail with its applicants
#[derive(Debug, Clone, Serialize)]
pub struct OpportunityDetailResponse {
    #[serde(flatten)]
    pub opportunity: Opportunity,
    pub applicants: Vec<Applicant>,
}

impl From<OpportunityDetail> for OpportunityDetailResponse {
    fn from(detail: OpportunityDetail) -> Self {
        Self {
            opportunity: detail.opportunity,
            applicants: detail.applicants.into_iter().map(Applicant::from).collect(),
        }
    }
}

/// An organizer's postings split around today's date
#[derive(Debug, Clone, Serialize)]
pub struct PostedOpportunitiesResponse {
    pub upcoming: Vec<Opportunity>,
    pub completed: Vec<Opportunity>,
}

/// Result of an applicant status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub status: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
