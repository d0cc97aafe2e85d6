// Integration tests for the filter and ranking pipeline

use volunteer_match::core::{
    acquire_location, distance::haversine_distance, filter_opportunities, ClientLocation,
    OpportunityRanker,
};
use volunteer_match::models::{
    Address, Category, FilterCriteria, GeoPoint, Opportunity, OpportunityStatus,
};
use std::time::Duration;

/// Kilometers per degree of latitude on the R = 6371 km sphere
const KM_PER_DEGREE: f64 = 111.19;

const USER: GeoPoint = GeoPoint {
    latitude: 13.0,
    longitude: 80.2,
};

fn create_test_opportunity(
    id: &str,
    category: Category,
    district: &str,
    status: OpportunityStatus,
    coordinates: Option<GeoPoint>,
) -> Opportunity {
    Opportunity {
        id: id.to_string(),
        title: format!("Opportunity {}", id),
        organization: format!("Organization {}", id),
        description: "Volunteers needed on weekends".to_string(),
        location: format!("{} town hall", district),
        category,
        address: Address {
            district: district.to_string(),
            state: "Tamil Nadu".to_string(),
            ..Default::default()
        },
        status,
        coordinates,
        volunteers_needed: 10,
        ..Default::default()
    }
}

/// Point `km` kilometers due north of the user
fn north_of_user(km: f64) -> Option<GeoPoint> {
    Some(GeoPoint::new(USER.latitude + km / KM_PER_DEGREE, USER.longitude))
}

fn sample_listing() -> Vec<Opportunity> {
    vec![
        create_test_opportunity("1", Category::Environment, "Chennai", OpportunityStatus::Open, north_of_user(5.0)),
        create_test_opportunity("2", Category::Education, "Madurai", OpportunityStatus::Open, north_of_user(300.0)),
        create_test_opportunity("3", Category::Environment, "Chennai", OpportunityStatus::Filled, north_of_user(12.0)),
        create_test_opportunity("4", Category::Healthcare, "Chengalpattu", OpportunityStatus::Open, north_of_user(40.0)),
        create_test_opportunity("5", Category::Community, "Chennai", OpportunityStatus::Completed, None),
        create_test_opportunity("6", Category::Education, "Chennai", OpportunityStatus::Open, north_of_user(18.0)),
    ]
}

fn ids(ranked: &[volunteer_match::core::RankedOpportunity<'_>]) -> Vec<String> {
    ranked.iter().map(|r| r.opportunity.id.clone()).collect()
}

#[test]
fn test_unfiltered_listing_is_identity() {
    let listing = sample_listing();
    let result = filter_opportunities(&listing, &FilterCriteria::default());

    assert_eq!(result.len(), listing.len());
    for (ranked, original) in result.iter().zip(listing.iter()) {
        assert_eq!(ranked.opportunity, original);
        assert_eq!(ranked.distance_km, None);
    }
}

#[test]
fn test_category_filter_keeps_input_order() {
    let listing = vec![
        create_test_opportunity("1", Category::Environment, "Chennai", OpportunityStatus::Open, None),
        create_test_opportunity("2", Category::Education, "Chennai", OpportunityStatus::Open, None),
        create_test_opportunity("3", Category::Environment, "Chennai", OpportunityStatus::Open, None),
    ];

    let criteria = FilterCriteria::new().with_category(Category::Environment);
    let result = filter_opportunities(&listing, &criteria);

    assert_eq!(ids(&result), vec!["1", "3"]);
}

#[test]
fn test_radius_filter_sorts_by_distance() {
    let listing = vec![
        create_test_opportunity("a", Category::Environment, "Chennai", OpportunityStatus::Open, north_of_user(5.0)),
        create_test_opportunity("b", Category::Environment, "Chennai", OpportunityStatus::Open, north_of_user(25.0)),
        create_test_opportunity("c", Category::Environment, "Chennai", OpportunityStatus::Open, north_of_user(12.0)),
    ];

    let criteria = FilterCriteria::new()
        .with_radius(20.0)
        .with_user_location(USER);
    let result = filter_opportunities(&listing, &criteria);

    assert_eq!(ids(&result), vec!["a", "c"]);
    let distances: Vec<f64> = result.iter().map(|r| r.distance_km.unwrap()).collect();
    assert!((distances[0] - 5.0).abs() < 0.1, "got {}", distances[0]);
    assert!((distances[1] - 12.0).abs() < 0.1, "got {}", distances[1]);
}

#[test]
fn test_radius_results_are_within_radius_and_sorted() {
    let listing = sample_listing();

    for radius in [1.0, 10.0, 20.0, 50.0, 500.0] {
        let criteria = FilterCriteria::new()
            .with_radius(radius)
            .with_user_location(USER);
        let result = filter_opportunities(&listing, &criteria);

        let mut previous = 0.0;
        for ranked in &result {
            let coordinates = ranked.opportunity.coordinates.expect("radius needs coordinates");
            let distance = haversine_distance(
                USER.latitude,
                USER.longitude,
                coordinates.latitude,
                coordinates.longitude,
            );
            assert!(distance <= radius, "{} km exceeds {} km", distance, radius);
            assert!(distance >= previous, "results must be non-decreasing");
            previous = distance;
        }
    }
}

#[test]
fn test_records_without_coordinates_excluded_only_by_radius() {
    let listing = sample_listing();

    let without_radius = filter_opportunities(
        &listing,
        &FilterCriteria::new().with_user_location(USER),
    );
    assert!(ids(&without_radius).contains(&"5".to_string()));
    assert_eq!(without_radius.len(), listing.len(), "no radius keeps input order");

    let with_radius = filter_opportunities(
        &listing,
        &FilterCriteria::new().with_radius(1000.0).with_user_location(USER),
    );
    assert!(!ids(&with_radius).contains(&"5".to_string()));
}

#[test]
fn test_radius_without_location_is_ignored() {
    let listing = sample_listing();
    let result = filter_opportunities(&listing, &FilterCriteria::new().with_radius(5.0));
    assert_eq!(result.len(), listing.len());
}

#[test]
fn test_search_matches_are_contained_in_fields() {
    let mut listing = sample_listing();
    listing[3].description = "Blood donation camp".to_string();

    let criteria = FilterCriteria::new().with_search("  BLOOD  ");
    let result = filter_opportunities(&listing, &criteria);

    assert_eq!(ids(&result), vec!["4"]);
}

#[test]
fn test_combined_filters_are_the_intersection() {
    let listing = sample_listing();

    let category_only = ids(&filter_opportunities(
        &listing,
        &FilterCriteria::new().with_category(Category::Environment),
    ));
    let district_only = ids(&filter_opportunities(
        &listing,
        &FilterCriteria::new().with_district("Chennai"),
    ));
    let status_only = ids(&filter_opportunities(
        &listing,
        &FilterCriteria::new().with_status(OpportunityStatus::Open),
    ));

    let combined = ids(&filter_opportunities(
        &listing,
        &FilterCriteria::new()
            .with_category(Category::Environment)
            .with_district("Chennai")
            .with_status(OpportunityStatus::Open),
    ));

    let expected: Vec<String> = category_only
        .iter()
        .filter(|id| district_only.contains(id) && status_only.contains(id))
        .cloned()
        .collect();

    assert_eq!(combined, expected);
    assert_eq!(combined, vec!["1"]);
}

#[test]
fn test_source_listing_is_not_modified() {
    let listing = sample_listing();
    let snapshot = listing.clone();

    let criteria = FilterCriteria::new()
        .with_search("opportunity")
        .with_radius(50.0)
        .with_user_location(USER);
    let _ = filter_opportunities(&listing, &criteria);

    assert_eq!(listing, snapshot);
}

#[test]
fn test_ranker_clamps_radius() {
    let listing = sample_listing();
    let ranker = OpportunityRanker::new(20.0);

    let criteria = FilterCriteria::new()
        .with_radius(1000.0)
        .with_user_location(USER);
    let result = ranker.rank(&listing, &criteria);

    assert!(result.radius_applied);
    assert_eq!(result.total_available, listing.len());
    assert_eq!(ids(&result.opportunities), vec!["1", "3", "6"]);
}

#[tokio::test]
async fn test_denied_location_falls_back_to_unfiltered_radius() {
    let listing = sample_listing();
    let client = ClientLocation::new(None, None, Some("denied"));

    let outcome = acquire_location(&client, Duration::from_secs(1)).await;
    assert!(outcome.location.is_none());
    assert!(outcome.notice.is_some());

    let mut criteria = FilterCriteria::new().with_radius(10.0);
    if let Some(location) = outcome.location {
        criteria = criteria.with_user_location(location);
    }

    let result = OpportunityRanker::default().rank(&listing, &criteria);
    assert!(!result.radius_applied);
    assert_eq!(result.opportunities.len(), listing.len());
}

#[tokio::test]
async fn test_relayed_location_enables_radius() {
    let listing = sample_listing();
    let client = ClientLocation::new(Some(USER.latitude), Some(USER.longitude), None);

    let outcome = acquire_location(&client, Duration::from_secs(1)).await;
    let location = outcome.location.expect("location relayed by client");

    let criteria = FilterCriteria::new()
        .with_radius(15.0)
        .with_user_location(location);
    let result = OpportunityRanker::default().rank(&listing, &criteria);

    assert_eq!(ids(&result.opportunities), vec!["1", "3"]);
}
