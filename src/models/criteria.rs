use std::str::FromStr;
use thiserror::Error;

use crate::models::domain::{Category, GeoPoint, OpportunityStatus};

/// Selection value that disables a category/district/status filter
pub const ALL_SENTINEL: &str = "All";

/// Errors raised while turning raw filter input into criteria
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown opportunity status: {0}")]
    UnknownStatus(String),

    #[error("Unknown application status: {0}")]
    UnknownApplicationStatus(String),

    #[error("Radius must be a non-negative number of kilometers, got {0}")]
    InvalidRadius(f64),
}

/// User-specified filter criteria for the opportunity listing
///
/// The default value disables every filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub category: Option<Category>,
    pub district: Option<String>,
    pub status: Option<OpportunityStatus>,
    /// 0 disables the radius filter
    pub radius_km: f64,
    pub user_location: Option<GeoPoint>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn with_status(mut self, status: OpportunityStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_user_location(mut self, location: GeoPoint) -> Self {
        self.user_location = Some(location);
        self
    }

    /// Radius filtering needs both a user coordinate and a non-zero radius.
    pub fn radius_active(&self) -> bool {
        self.user_location.is_some() && self.radius_km > 0.0
    }
}

/// Parse a selection where empty input or "All" means no filter
pub fn parse_selection<T: FromStr>(raw: Option<&str>) -> Result<Option<T>, T::Err> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case(ALL_SENTINEL) => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
