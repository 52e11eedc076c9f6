//! Collaborator seams.
//!
//! The planner core is pure; everything that touches the network, the device
//! or storage sits behind one of these traits.

use std::time::Duration;

use crate::error::{GeolocationError, RouteError};
use crate::geolocation::PositionRequest;
use crate::planner::CancelToken;
use crate::polyline::Polyline;
use crate::store::{RouteRecord, RouteStatus};

/// Per-request controls handed to a routing provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteRequest<'a> {
    pub timeout: Option<Duration>,
    pub cancel: Option<&'a CancelToken>,
}

impl RouteRequest<'_> {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancelToken::is_cancelled)
    }
}

/// Road route as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRoute {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub polyline: Polyline,
}

/// Computes a drivable route through waypoints, in the given order.
///
/// Waypoints are (lat, lng); the first one is the origin.
pub trait RoutingProvider {
    fn route(
        &self,
        waypoints: &[(f64, f64)],
        request: &RouteRequest<'_>,
    ) -> Result<ProviderRoute, RouteError>;
}

/// Source of the device's current position.
pub trait LocationProvider {
    /// Returns (lat, lng).
    fn current_position(&self, request: &PositionRequest) -> Result<(f64, f64), GeolocationError>;
}

/// Storage for finalized routes. The planner only produces `RouteRecord`s.
pub trait RouteStore {
    type Id;
    type Error;

    fn create_route(&self, route: &RouteRecord) -> Result<Self::Id, Self::Error>;

    fn update_status(&self, id: &Self::Id, status: RouteStatus) -> Result<(), Self::Error>;

    fn set_stop_visited(
        &self,
        id: &Self::Id,
        stop_index: usize,
        visited: bool,
        note: Option<&str>,
    ) -> Result<(), Self::Error>;
}
