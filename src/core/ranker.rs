use crate::core::{
    distance::calculate_bounding_box,
    filters::{
        distance_to, matches_category, matches_district, matches_search, matches_status,
        normalize_search, within_radius,
    },
};
use crate::models::{FilterCriteria, Opportunity};

/// An opportunity that passed the filters
///
/// Borrows from the source list, which is never modified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedOpportunity<'a> {
    pub opportunity: &'a Opportunity,
    /// Set whenever the user location and the record's coordinates are known
    pub distance_km: Option<f64>,
}

/// Filter and rank opportunities
///
/// All active criteria are AND-ed. With an active radius filter the result
/// is sorted by ascending distance (ties keep their input order); otherwise
/// input order is preserved.
pub fn filter_opportunities<'a>(
    opportunities: &'a [Opportunity],
    criteria: &FilterCriteria,
) -> Vec<RankedOpportunity<'a>> {
    let needle = normalize_search(&criteria.search);
    let district = criteria.district.as_deref();

    let radius = criteria
        .user_location
        .filter(|_| criteria.radius_active())
        .map(|user| {
            let bbox = calculate_bounding_box(user.latitude, user.longitude, criteria.radius_km);
            (user, bbox)
        });

    let mut ranked: Vec<RankedOpportunity<'a>> = opportunities
        .iter()
        .filter(|opp| matches_search(opp, &needle))
        .filter(|opp| matches_category(opp, criteria.category))
        .filter(|opp| matches_district(opp, district))
        .filter(|opp| matches_status(opp, criteria.status))
        .filter_map(|opp| {
            let distance_km = match (&radius, &criteria.user_location) {
                (Some((user, bbox)), _) => {
                    Some(within_radius(user, bbox, criteria.radius_km, opp)?)
                }
                (None, Some(user)) => distance_to(user, opp),
                (None, None) => None,
            };

            Some(RankedOpportunity {
                opportunity: opp,
                distance_km,
            })
        })
        .collect();

    if radius.is_some() {
        // stable sort; every entry has a distance here
        ranked.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    ranked
}

/// Result of a ranking pass
#[derive(Debug)]
pub struct RankResult<'a> {
    pub opportunities: Vec<RankedOpportunity<'a>>,
    pub total_available: usize,
    pub radius_applied: bool,
}

/// Opportunity ranker configured with service limits
#[derive(Debug, Clone, Copy)]
pub struct OpportunityRanker {
    max_radius_km: f64,
}

impl OpportunityRanker {
    pub fn new(max_radius_km: f64) -> Self {
        Self { max_radius_km }
    }

    pub fn max_radius_km(&self) -> f64 {
        self.max_radius_km
    }

    /// Rank opportunities, clamping the requested radius to the configured maximum
    pub fn rank<'a>(
        &self,
        opportunities: &'a [Opportunity],
        criteria: &FilterCriteria,
    ) -> RankResult<'a> {
        let clamped;
        let effective = if criteria.radius_km > self.max_radius_km {
            tracing::debug!(
                "Clamping radius {}km to configured maximum {}km",
                criteria.radius_km,
                self.max_radius_km
            );
            clamped = criteria.clone().with_radius(self.max_radius_km);
            &clamped
        } else {
            criteria
        };

        RankResult {
            opportunities: filter_opportunities(opportunities, effective),
            total_available: opportunities.len(),
            radius_applied: effective.radius_active(),
        }
    }
}

impl Default for OpportunityRanker {
    fn default() -> Self {
        Self::new(500.0)
    }
}
