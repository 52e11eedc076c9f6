//! Test fixtures for field-route-planner.
//!
//! Provides:
//! - Real Las Vegas visit points (routable with OSRM Nevada data)
//! - A scripted routing provider that records its calls

pub mod field_points;
pub mod routing;

#[allow(unused_imports)]
pub use field_points::*;
#[allow(unused_imports)]
pub use routing::*;
