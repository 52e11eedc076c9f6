//! Visit points fed into the route planner.

use serde::{Deserialize, Serialize};

/// What a point refers to in the surrounding system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    Origin,
    Demand,
    Citizen,
}

/// A geocoded location to visit (or start from).
///
/// Points are treated as immutable for the duration of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub id: String,
    pub kind: PointKind,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl GeoPoint {
    pub fn new(
        id: impl Into<String>,
        kind: PointKind,
        name: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            lat,
            lng,
            address: None,
        }
    }

    /// Starting point for a route, typically the device's current position.
    pub fn origin(lat: f64, lng: f64) -> Self {
        Self::new("origin", PointKind::Origin, "Origin", lat, lng)
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Location coordinates (lat, lng).
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// True when both coordinates are finite and non-zero.
    ///
    /// A zero coordinate is how the upstream records mark a missing geocode.
    pub fn has_valid_coordinates(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && self.lat != 0.0 && self.lng != 0.0
    }
}

/// Drops points that were never geocoded, keeping the input order.
pub fn retain_geocoded(points: Vec<GeoPoint>) -> Vec<GeoPoint> {
    points
        .into_iter()
        .filter(GeoPoint::has_valid_coordinates)
        .collect()
}
