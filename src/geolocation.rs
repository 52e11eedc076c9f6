//! Device position lookup used to seed a route's origin.

use std::time::Duration;

use tracing::warn;

use crate::error::GeolocationError;
use crate::point::GeoPoint;
use crate::traits::LocationProvider;

/// How a fix is requested from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRequest {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix that may be returned. Zero forces a fresh one.
    pub maximum_age: Duration,
}

impl Default for PositionRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(15),
            maximum_age: Duration::ZERO,
        }
    }
}

impl GeolocationError {
    /// Maps the standard position error codes (1 denied, 2 unavailable, 3 timeout).
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            1 => Self::Denied,
            2 => Self::Unavailable,
            3 => Self::Timeout,
            _ => Self::Other(message.into()),
        }
    }
}

/// Asks the device for a fresh fix and turns it into a route origin.
pub fn locate_origin<L: LocationProvider>(
    provider: &L,
    request: &PositionRequest,
) -> Result<GeoPoint, GeolocationError> {
    let (lat, lng) = provider
        .current_position(request)
        .inspect_err(|err| warn!(error = %err, "current position unavailable"))?;
    Ok(GeoPoint::origin(lat, lng))
}
