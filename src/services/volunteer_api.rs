use crate::models::{
    ApplicantStatusUpdate, Application, ApplicationRequest, NewOpportunityRequest, Opportunity,
    OpportunityDetail,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the volunteer API
#[derive(Debug, Error)]
pub enum VolunteerApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: missing or rejected bearer token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Bearer token of the calling user
///
/// Passed explicitly to every authenticated call.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Volunteer REST API client
///
/// Handles all communication with the volunteer backend:
/// - Listing and fetching opportunities
/// - Posting opportunities
/// - Submitting applications and reviewing applicants
pub struct VolunteerApiClient {
    base_url: String,
    client: Client,
}

impl VolunteerApiClient {
    /// Create a new client for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, VolunteerApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(builder: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", token.as_str()))
    }

    /// Map non-success statuses onto API errors
    async fn check_status(response: Response, what: &str) -> Result<Response, VolunteerApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::debug!("{} failed: {} - {}", what, status, body);

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => VolunteerApiError::Unauthorized,
            StatusCode::NOT_FOUND => VolunteerApiError::NotFound(what.to_string()),
            _ => VolunteerApiError::ApiError(format!("{} failed: {}", what, status)),
        })
    }

    /// Fetch the public opportunity listing
    pub async fn list_opportunities(&self) -> Result<Vec<Opportunity>, VolunteerApiError> {
        let url = self.url("/opportunities");
        tracing::debug!("Fetching opportunities from: {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response, "List opportunities").await?;
        let json: Value = response.json().await?;

        let documents = documents_of(&json)?;
        let opportunities = parse_opportunities(documents);

        tracing::debug!(
            "Fetched {} opportunities ({} documents)",
            opportunities.len(),
            documents.len()
        );

        Ok(opportunities)
    }

    /// Fetch one opportunity with its applicants
    pub async fn get_opportunity(
        &self,
        opportunity_id: &str,
        token: &AuthToken,
    ) -> Result<OpportunityDetail, VolunteerApiError> {
        let url = self.url(&format!(
            "/opportunities/{}",
            urlencoding::encode(opportunity_id)
        ));

        let response = Self::authorized(self.client.get(&url), token).send().await?;
        let response =
            Self::check_status(response, &format!("Opportunity {}", opportunity_id)).await?;
        let json: Value = response.json().await?;

        serde_json::from_value(json).map_err(|e| {
            VolunteerApiError::InvalidResponse(format!("Failed to parse opportunity: {}", e))
        })
    }

    /// Fetch the opportunities posted by a user
    pub async fn opportunities_posted_by(
        &self,
        user_id: &str,
        token: &AuthToken,
    ) -> Result<Vec<Opportunity>, VolunteerApiError> {
        let url = self.url(&format!(
            "/opportunities/user/{}",
            urlencoding::encode(user_id)
        ));

        let response = Self::authorized(self.client.get(&url), token).send().await?;
        let response =
            Self::check_status(response, &format!("Opportunities of user {}", user_id)).await?;
        let json: Value = response.json().await?;

        Ok(parse_opportunities(documents_of(&json)?))
    }

    /// Post a new opportunity and return the stored record
    pub async fn create_opportunity(
        &self,
        request: &NewOpportunityRequest,
        token: &AuthToken,
    ) -> Result<Opportunity, VolunteerApiError> {
        let url = self.url("/opportunities/");

        let response = Self::authorized(self.client.post(&url), token)
            .json(request)
            .send()
            .await?;
        let response = Self::check_status(response, "Create opportunity").await?;
        let json: Value = response.json().await?;

        let data = json.get("opportunity").unwrap_or(&json);
        serde_json::from_value(data.clone()).map_err(|e| {
            VolunteerApiError::InvalidResponse(format!("Failed to parse created opportunity: {}", e))
        })
    }

    /// Submit an application
    pub async fn apply(
        &self,
        request: &ApplicationRequest,
        token: &AuthToken,
    ) -> Result<Application, VolunteerApiError> {
        let url = self.url("/applications/apply");

        let response = Self::authorized(self.client.post(&url), token)
            .json(request)
            .send()
            .await?;
        let response = Self::check_status(response, "Apply").await?;
        let json: Value = response.json().await?;

        let data = json.get("application").unwrap_or(&json);
        serde_json::from_value(data.clone()).map_err(|e| {
            VolunteerApiError::InvalidResponse(format!("Failed to parse application: {}", e))
        })
    }

    /// Approve, reject or reset an applicant
    pub async fn update_applicant_status(
        &self,
        opportunity_id: &str,
        update: &ApplicantStatusUpdate,
        token: &AuthToken,
    ) -> Result<(), VolunteerApiError> {
        let url = self.url(&format!(
            "/opportunities/{}",
            urlencoding::encode(opportunity_id)
        ));

        let response = Self::authorized(self.client.put(&url), token)
            .json(update)
            .send()
            .await?;
        Self::check_status(response, &format!("Update applicant on {}", opportunity_id)).await?;

        tracing::debug!(
            "Applicant {} on {} set to {}",
            update.user_id,
            opportunity_id,
            update.status.as_str()
        );

        Ok(())
    }
}

/// Listing payloads come either as a bare array or wrapped in `opportunities`
fn documents_of(json: &Value) -> Result<&Vec<Value>, VolunteerApiError> {
    json.as_array()
        .or_else(|| json.get("opportunities").and_then(|d| d.as_array()))
        .ok_or_else(|| VolunteerApiError::InvalidResponse("Missing opportunities array".into()))
}

/// Parse documents, skipping the ones that do not describe an opportunity
fn parse_opportunities(documents: &[Value]) -> Vec<Opportunity> {
    documents
        .iter()
        .filter_map(|doc| match serde_json::from_value::<Opportunity>(doc.clone()) {
            Ok(opportunity) => Some(opportunity),
            Err(e) => {
                let id = doc.get("_id").cloned().unwrap_or_default();
                tracing::warn!("Skipping malformed opportunity {}: {}", id, e);
                None
            }
        })
        .collect()
}
