use chrono::NaiveDate;

use crate::models::Opportunity;

/// An organizer's postings split around a reference date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostedOpportunities {
    pub upcoming: Vec<Opportunity>,
    pub completed: Vec<Opportunity>,
}

/// An opportunity is completed once its event date is before `today`.
/// Events dated today are still upcoming for the whole day.
/// Records with an unparseable date stay upcoming.
#[inline]
pub fn is_completed(opportunity: &Opportunity, today: NaiveDate) -> bool {
    opportunity.event_date().is_some_and(|date| date < today)
}

/// Split postings into upcoming and completed, keeping input order in both
pub fn partition_by_date(opportunities: Vec<Opportunity>, today: NaiveDate) -> PostedOpportunities {
    let (completed, upcoming) = opportunities
        .into_iter()
        .partition(|opp| is_completed(opp, today));

    PostedOpportunities { upcoming, completed }
}
