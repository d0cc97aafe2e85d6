// Model exports
pub mod criteria;
pub mod domain;
pub mod requests;
pub mod responses;

pub use criteria::{CriteriaError, FilterCriteria, ALL_SENTINEL};
pub use domain::{
    Address, Applicant, ApplicantRecord, Application, ApplicationStatus, BoundingBox, Category,
    GeoPoint, Opportunity, OpportunityDetail, OpportunityStatus, TAMIL_NADU_DISTRICTS,
};
pub use requests::{
    AddressInput, ApplicantStatusRequest, ApplicantStatusUpdate, ApplicationRequest,
    NewOpportunityRequest, OpportunityQuery,
};
pub use responses::{
    ErrorResponse, HealthResponse, OpportunityDetailResponse, OpportunityListResponse,
    PostedOpportunitiesResponse, RankedOpportunityView, StatusUpdateResponse,
};
