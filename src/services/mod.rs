// Service exports
pub mod cache;
pub mod volunteer_api;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use volunteer_api::{AuthToken, VolunteerApiClient, VolunteerApiError};
