use crate::models::{BoundingBox, GeoPoint};

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // rounding can push near-antipodal pairs past 1.0
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance between two points
#[inline]
pub fn distance_between(from: &GeoPoint, to: &GeoPoint) -> f64 {
    haversine_distance(from.latitude, from.longitude, to.latitude, to.longitude)
}

/// Calculate the smallest lat/lon box containing every point within `radius_km`
///
/// Cheaper than Haversine, so it is used to reject far-away records first.
/// When the circle reaches a pole or crosses the antimeridian the box spans
/// all longitudes, which keeps the check conservative.
///
/// # Arguments
/// * `lat` - Center latitude in degrees
/// * `lon` - Center longitude in degrees
/// * `radius_km` - Radius in kilometers
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let angular = radius_km / EARTH_RADIUS_KM;
    let lat_rad = lat.to_radians();
    let min_lat = lat_rad - angular;
    let max_lat = lat_rad + angular;

    let half_pi = std::f64::consts::FRAC_PI_2;
    let full_longitudes = |min_lat: f64, max_lat: f64| BoundingBox {
        min_lat: min_lat.max(-half_pi).to_degrees(),
        max_lat: max_lat.min(half_pi).to_degrees(),
        min_lon: -180.0,
        max_lon: 180.0,
    };

    if min_lat <= -half_pi || max_lat >= half_pi {
        return full_longitudes(min_lat, max_lat);
    }

    let ratio = angular.sin() / lat_rad.cos();
    if ratio >= 1.0 {
        return full_longitudes(min_lat, max_lat);
    }

    let lon_delta = ratio.asin().to_degrees();
    let (min_lon, max_lon) = (lon - lon_delta, lon + lon_delta);
    if min_lon < -180.0 || max_lon > 180.0 {
        return full_longitudes(min_lat, max_lat);
    }

    BoundingBox {
        min_lat: min_lat.to_degrees(),
        max_lat: max_lat.to_degrees(),
        min_lon,
        max_lon,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat && lat <= bbox.max_lat && lon >= bbox.min_lon && lon <= bbox.max_lon
}
