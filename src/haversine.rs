//! Great-circle distance between points.
//!
//! Used to order stops before the real road route is requested. Ignores the
//! road network entirely; the provider's figures replace it in the final plan.

use crate::point::GeoPoint;

/// Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two (lat, lng) pairs.
pub fn haversine_m(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Distance in meters between two points.
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_m(a.coords(), b.coords())
}
