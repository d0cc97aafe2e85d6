// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod geolocation;
pub mod ranker;
pub mod schedule;

pub use distance::{calculate_bounding_box, distance_between, haversine_distance, is_within_bounding_box};
pub use filters::{distance_to, matches_category, matches_district, matches_search, matches_status, within_radius};
pub use geolocation::{acquire_location, ClientLocation, GeolocationError, Geolocator, LocationOutcome};
pub use ranker::{filter_opportunities, OpportunityRanker, RankResult, RankedOpportunity};
pub use schedule::{partition_by_date, PostedOpportunities};
