use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::criteria::CriteriaError;

/// Opportunity category
///
/// Deserialized through [`FromStr`], so upstream spelling and case variants are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Category {
    #[default]
    Environment,
    Community,
    Education,
    Healthcare,
    #[serde(rename = "Social Work")]
    SocialWork,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Environment,
        Category::Community,
        Category::Education,
        Category::Healthcare,
        Category::SocialWork,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Environment => "Environment",
            Category::Community => "Community",
            Category::Education => "Education",
            Category::Healthcare => "Healthcare",
            Category::SocialWork => "Social Work",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "environment" => Ok(Category::Environment),
            "community" | "community service" => Ok(Category::Community),
            "education" => Ok(Category::Education),
            "healthcare" => Ok(Category::Healthcare),
            "social work" | "socialwork" => Ok(Category::SocialWork),
            _ => Err(CriteriaError::UnknownCategory(s.to_string())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = CriteriaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Lifecycle status of an opportunity, as reported by the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum OpportunityStatus {
    #[default]
    Open,
    Filled,
    Completed,
    Canceled,
}

impl OpportunityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityStatus::Open => "Open",
            OpportunityStatus::Filled => "Filled",
            OpportunityStatus::Completed => "Completed",
            OpportunityStatus::Canceled => "Canceled",
        }
    }
}

impl FromStr for OpportunityStatus {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(OpportunityStatus::Open),
            "filled" => Ok(OpportunityStatus::Filled),
            "completed" => Ok(OpportunityStatus::Completed),
            "canceled" | "cancelled" => Ok(OpportunityStatus::Canceled),
            _ => Err(CriteriaError::UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for OpportunityStatus {
    type Error = CriteriaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Finite and within [-90, 90] x [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Postal address of an opportunity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub state: String,
}

/// Volunteer opportunity as served by the volunteer API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    /// Hours
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub duration: f64,
    #[serde(default)]
    pub description: String,
    /// Comma-separated skill names
    #[serde(default, deserialize_with = "deserialize_skills")]
    pub skills: String,
    #[serde(rename = "volunteers", default, deserialize_with = "deserialize_count")]
    pub volunteers_needed: u32,
    #[serde(rename = "appliedVolunteers", default, deserialize_with = "deserialize_count")]
    pub applied_volunteers: u32,
    #[serde(default)]
    pub status: OpportunityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    #[serde(alias = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(rename = "postedBy", alias = "createdBy", default, skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<String>,
}

impl Opportunity {
    /// Skills split on commas, trimmed, empties dropped
    pub fn skill_list(&self) -> Vec<&str> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn spots_remaining(&self) -> u32 {
        self.volunteers_needed.saturating_sub(self.applied_volunteers)
    }

    /// Parses the `YYYY-MM-DD` prefix of `date`; ISO timestamps are accepted too.
    pub fn event_date(&self) -> Option<chrono::NaiveDate> {
        let prefix = self.date.get(..10)?;
        chrono::NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
}

impl LenientNumber {
    /// Leading numeric part of text values, so "4 hours" and "5-10" still parse.
    fn value(self) -> Option<f64> {
        match self {
            LenientNumber::Number(n) => Some(n),
            LenientNumber::Text(text) => {
                let digits: String = text
                    .trim()
                    .chars()
                    .take_while(|c| c.is_ascii_digit() || *c == '.')
                    .collect();
                digits.parse().ok()
            }
        }
    }
}

fn deserialize_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LenientNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(LenientNumber::value).unwrap_or(0.0))
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LenientNumber>::deserialize(deserializer)?;
    Ok(raw
        .and_then(LenientNumber::value)
        .filter(|n| *n >= 0.0)
        .map(|n| n.min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

fn deserialize_skills<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Skills {
        Text(String),
        List(Vec<String>),
    }

    Ok(match Option::<Skills>::deserialize(deserializer)? {
        Some(Skills::Text(text)) => text,
        Some(Skills::List(items)) => items.join(", "),
        None => String::new(),
    })
}

/// Review status of an application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = CriteriaError;

    /// Accepts both the API spellings and the organizer dashboard ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "approved" | "accepted" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(CriteriaError::UnknownApplicationStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for ApplicationStatus {
    type Error = CriteriaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A user's application to an opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(rename = "opportunityId", default)]
    pub opportunity_id: String,
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: String,
    #[serde(rename = "relevantExperience", default)]
    pub relevant_experience: String,
    #[serde(rename = "additionalMessage", default)]
    pub additional_message: String,
    #[serde(default)]
    pub status: ApplicationStatus,
}

/// Applicant entry embedded in an opportunity detail record
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicantRecord {
    #[serde(rename = "userId")]
    pub user: ApplicantUser,
    #[serde(default)]
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicantUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "emailid", alias = "email", default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Applicant summary shown to the organizer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Applicant {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: ApplicationStatus,
}

impl From<ApplicantRecord> for Applicant {
    fn from(record: ApplicantRecord) -> Self {
        Self {
            id: record.user.id,
            name: record.user.name,
            email: record.user.email,
            phone: record
                .user
                .phone
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| "Not provided".to_string()),
            status: record.status,
        }
    }
}

/// Opportunity detail record including its applicants
#[derive(Debug, Clone, Deserialize)]
pub struct OpportunityDetail {
    #[serde(flatten)]
    pub opportunity: Opportunity,
    #[serde(default)]
    pub applicants: Vec<ApplicantRecord>,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Districts accepted for new postings
pub const TAMIL_NADU_DISTRICTS: &[&str] = &[
    "Ariyalur", "Chennai", "Coimbatore", "Cuddalore", "Dharmapuri",
    "Dindigul", "Erode", "Kallakurichi", "Kanchipuram", "Kanyakumari",
    "Karur", "Krishnagiri", "Madurai", "Mayiladuthurai", "Nagapattinam",
    "Namakkal", "Nilgiris", "Perambalur", "Pudukkottai", "Ramanathapuram",
    "Ranipet", "Salem", "Sivaganga", "Tenkasi", "Thanjavur",
    "Theni", "Thoothukudi", "Tiruchirappalli", "Tirunelveli", "Tirupathur",
    "Tiruppur", "Tiruvallur", "Tiruvannamalai", "Tiruvarur", "Vellore",
    "Viluppuram", "Virudhunagar",
];
