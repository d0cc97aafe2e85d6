use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::models::GeoPoint;

/// Reasons a user location could not be determined
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location request timed out")]
    Timeout,

    #[error("geolocation is not supported")]
    Unsupported,

    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("reported location is not a valid coordinate")]
    InvalidCoordinate,
}

impl GeolocationError {
    /// Message shown to the user when the radius filter has to be skipped
    pub fn notice(&self) -> String {
        let reason = match self {
            GeolocationError::PermissionDenied => "Location access was denied".to_string(),
            GeolocationError::Timeout => "Timed out while determining your location".to_string(),
            GeolocationError::Unsupported => {
                "Geolocation is not supported by your browser".to_string()
            }
            GeolocationError::Unavailable(detail) => {
                format!("Your location could not be determined ({})", detail)
            }
            GeolocationError::InvalidCoordinate => {
                "The reported location is not a valid coordinate".to_string()
            }
        };
        format!("{}. Showing opportunities without a distance filter.", reason)
    }
}

/// Source of the user's current coordinate
pub trait Geolocator {
    fn locate(&self) -> impl Future<Output = Result<GeoPoint, GeolocationError>> + Send;
}

/// Location relayed by the browser client
///
/// The browser runs the geolocation request itself and forwards either the
/// coordinate or an error code (`denied`, `timeout`, `unsupported`).
#[derive(Debug, Clone, Default)]
pub struct ClientLocation {
    coordinate: Option<GeoPoint>,
    error_code: Option<String>,
}

impl ClientLocation {
    pub fn new(lat: Option<f64>, lng: Option<f64>, error_code: Option<&str>) -> Self {
        let coordinate = match (lat, lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };

        Self {
            coordinate,
            error_code: error_code.map(str::to_string),
        }
    }
}

impl Geolocator for ClientLocation {
    async fn locate(&self) -> Result<GeoPoint, GeolocationError> {
        if let Some(code) = &self.error_code {
            return Err(match code.trim().to_lowercase().as_str() {
                "denied" | "permission_denied" | "1" => GeolocationError::PermissionDenied,
                "timeout" | "3" => GeolocationError::Timeout,
                "unsupported" => GeolocationError::Unsupported,
                other => GeolocationError::Unavailable(other.to_string()),
            });
        }

        self.coordinate.ok_or(GeolocationError::Unsupported)
    }
}

/// Outcome of a location attempt
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationOutcome {
    pub location: Option<GeoPoint>,
    /// Explanation for the user when no location is available
    pub notice: Option<String>,
}

impl LocationOutcome {
    fn located(point: GeoPoint) -> Self {
        Self {
            location: Some(point),
            notice: None,
        }
    }

    fn failed(error: GeolocationError) -> Self {
        tracing::debug!("Geolocation failed, radius filter disabled: {}", error);
        Self {
            location: None,
            notice: Some(error.notice()),
        }
    }
}

/// Acquire the user location with a single attempt bounded by `timeout`
///
/// There is no retry; any failure yields no location and a notice.
pub async fn acquire_location<G: Geolocator>(geolocator: &G, timeout: Duration) -> LocationOutcome {
    match tokio::time::timeout(timeout, geolocator.locate()).await {
        Ok(Ok(point)) if point.is_valid() => LocationOutcome::located(point),
        Ok(Ok(_)) => LocationOutcome::failed(GeolocationError::InvalidCoordinate),
        Ok(Err(error)) => LocationOutcome::failed(error),
        Err(_) => LocationOutcome::failed(GeolocationError::Timeout),
    }
}
