//! Field-visit route planner.
//!
//! Orders a set of visit points from a starting location, fetches the drivable
//! route for that order from an OSRM-compatible service, and schedules visit
//! times along it.

pub mod error;
pub mod geolocation;
pub mod haversine;
pub mod itinerary;
pub mod links;
pub mod osrm;
pub mod planner;
pub mod point;
pub mod polyline;
pub mod solver;
pub mod store;
pub mod tour;
pub mod traits;

pub use error::{GeolocationError, LifecycleError, RouteError, ScheduleError};
pub use planner::{CancelToken, PlanOptions, RoutePlan, RoutePlanner};
pub use point::{GeoPoint, PointKind};
pub use tour::Tour;
