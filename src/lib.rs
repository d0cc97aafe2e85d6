//! Volunteer Match - opportunity filtering and ranking service
//!
//! Fetches volunteer opportunities from the volunteer REST API, filters them
//! by free-text search, category, district, status and distance from the
//! user, and forwards posting and application requests with validated
//! payloads.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{filter_opportunities, haversine_distance, OpportunityRanker, RankedOpportunity};
pub use crate::models::{Category, FilterCriteria, GeoPoint, Opportunity, OpportunityStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let opportunities = vec![Opportunity {
            title: "Library Helper".to_string(),
            ..Default::default()
        }];
        let result = filter_opportunities(&opportunities, &FilterCriteria::default());
        assert_eq!(result.len(), 1);
        assert!(haversine_distance(13.0, 80.2, 13.0, 80.2) < 0.01);
    }
}
