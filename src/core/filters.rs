use crate::core::distance::{distance_between, is_within_bounding_box};
use crate::models::{BoundingBox, Category, GeoPoint, Opportunity, OpportunityStatus};

/// Normalize a raw search term: trimmed and lowercased, empty when inactive
pub fn normalize_search(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Case-insensitive substring match on title, description, organization
/// and location. `needle` must come from [`normalize_search`].
#[inline]
pub fn matches_search(opportunity: &Opportunity, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    [
        &opportunity.title,
        &opportunity.description,
        &opportunity.organization,
        &opportunity.location,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

#[inline]
pub fn matches_category(opportunity: &Opportunity, category: Option<Category>) -> bool {
    category.map_or(true, |c| opportunity.category == c)
}

#[inline]
pub fn matches_district(opportunity: &Opportunity, district: Option<&str>) -> bool {
    district.map_or(true, |d| opportunity.address.district == d)
}

#[inline]
pub fn matches_status(opportunity: &Opportunity, status: Option<OpportunityStatus>) -> bool {
    status.map_or(true, |s| opportunity.status == s)
}

/// Distance from the user to the opportunity, if it has coordinates
#[inline]
pub fn distance_to(user: &GeoPoint, opportunity: &Opportunity) -> Option<f64> {
    opportunity
        .coordinates
        .as_ref()
        .map(|point| distance_between(user, point))
}

/// Radius check: bounding box first, then Haversine.
///
/// Returns the distance when the opportunity is within `radius_km`; records
/// without coordinates never pass.
#[inline]
pub fn within_radius(
    user: &GeoPoint,
    bbox: &BoundingBox,
    radius_km: f64,
    opportunity: &Opportunity,
) -> Option<f64> {
    let point = opportunity.coordinates.as_ref()?;
    if !is_within_bounding_box(point.latitude, point.longitude, bbox) {
        return None;
    }

    let distance = distance_between(user, point);
    (distance <= radius_km).then_some(distance)
}
