use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::criteria::{parse_selection, CriteriaError, FilterCriteria};
use crate::models::domain::{
    ApplicationStatus, Category, GeoPoint, OpportunityStatus, TAMIL_NADU_DISTRICTS,
};

/// Query string of the opportunity listing
///
/// `lat`/`lng` or `geo_error` relay the browser's geolocation result.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OpportunityQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub radius: Option<f64>,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default, alias = "lon")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub geo_error: Option<String>,
}

impl OpportunityQuery {
    /// Build criteria from the query; the user location is attached later,
    /// once geolocation has been resolved.
    pub fn to_criteria(&self) -> Result<FilterCriteria, CriteriaError> {
        let radius_km = self.radius.unwrap_or(0.0);
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(CriteriaError::InvalidRadius(radius_km));
        }

        Ok(FilterCriteria {
            search: self.search.clone().unwrap_or_default(),
            category: parse_selection::<Category>(self.category.as_deref())?,
            district: parse_selection::<String>(self.district.as_deref()).unwrap_or(None),
            status: parse_selection::<OpportunityStatus>(self.status.as_deref())?,
            radius_km,
            user_location: None,
        })
    }

    /// Whether the client relayed anything about its location
    pub fn has_location_input(&self) -> bool {
        (self.lat.is_some() && self.lng.is_some()) || self.geo_error.is_some()
    }
}

/// Address part of a new posting
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressInput {
    #[validate(length(min = 1))]
    pub street: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(custom(function = "validate_district"))]
    pub district: String,
    #[validate(custom(function = "validate_pincode"))]
    pub pincode: String,
    #[serde(default = "default_state")]
    pub state: String,
}

fn default_state() -> String {
    "Tamil Nadu".to_string()
}

/// Request to post a new opportunity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_posting"))]
pub struct NewOpportunityRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub organization: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(nested)]
    pub address: AddressInput,
    #[validate(custom(function = "validate_date"))]
    pub date: String,
    #[validate(custom(function = "validate_time"))]
    pub start_time: String,
    #[validate(custom(function = "validate_time"))]
    pub end_time: String,
    #[serde(default)]
    pub category: Category,
    #[validate(range(exclusive_min = 0.0, max = 24.0))]
    pub duration: f64,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub skills: String,
    #[validate(range(min = 1))]
    pub volunteers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    #[validate(url)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Request to apply to an opportunity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplicationRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "opportunityId")]
    pub opportunity_id: String,
    #[validate(length(min = 1))]
    #[serde(rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1, max = 120))]
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[validate(custom(function = "validate_phone"))]
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[validate(length(max = 2000))]
    #[serde(rename = "relevantExperience", default)]
    pub relevant_experience: String,
    #[validate(length(max = 2000))]
    #[serde(rename = "additionalMessage", default)]
    pub additional_message: String,
}

/// Organizer decision on an applicant, as sent by the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplicantStatusRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "userId")]
    pub user_id: String,
    pub status: String,
    #[validate(length(min = 1))]
    #[serde(rename = "requesterId")]
    pub requester_id: String,
}

/// Applicant status update in the API's wire format
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantStatusUpdate {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub status: ApplicationStatus,
    #[serde(rename = "requesterId")]
    pub requester_id: String,
}

impl TryFrom<&ApplicantStatusRequest> for ApplicantStatusUpdate {
    type Error = CriteriaError;

    fn try_from(req: &ApplicantStatusRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: req.user_id.clone(),
            status: req.status.parse()?,
            requester_id: req.requester_id.clone(),
        })
    }
}

fn validate_district(district: &str) -> Result<(), ValidationError> {
    if TAMIL_NADU_DISTRICTS.contains(&district) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_district"))
    }
}

fn validate_pincode(pincode: &str) -> Result<(), ValidationError> {
    if pincode.len() == 6 && pincode.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_pincode"))
    }
}

fn validate_date(date: &str) -> Result<(), ValidationError> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_date"))
}

fn validate_time(time: &str) -> Result<(), ValidationError> {
    chrono::NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_time"))
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone"))
    }
}

fn validate_posting(req: &NewOpportunityRequest) -> Result<(), ValidationError> {
    if req.coordinates.is_some_and(|point| !point.is_valid()) {
        return Err(ValidationError::new("invalid_coordinates"));
    }

    let start = chrono::NaiveTime::parse_from_str(&req.start_time, "%H:%M");
    let end = chrono::NaiveTime::parse_from_str(&req.end_time, "%H:%M");
    match (start, end) {
        (Ok(start), Ok(end)) if end <= start => Err(ValidationError::new("end_before_start")),
        // malformed times are reported by the field validators
        _ => Ok(()),
    }
}
