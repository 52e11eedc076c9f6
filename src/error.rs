//! Error types for planning, scheduling and collaborator failures.

use thiserror::Error as ThisError;

use crate::store::RouteStatus;

/// Failure of a single `plan` invocation. No partial plan accompanies it.
#[derive(Debug, ThisError)]
pub enum RouteError {
    #[error("no origin supplied")]
    MissingOrigin,
    #[error("no points to visit")]
    EmptyPointSet,
    #[error("point {id} has no usable coordinates")]
    InvalidCoordinates { id: String },
    #[error("routing provider error: {message}")]
    RoutingProvider { message: String },
    #[error("routing request timed out")]
    Timeout,
    #[error("routing request cancelled")]
    Cancelled,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl RouteError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::RoutingProvider {
            message: message.into(),
        }
    }
}

/// Device location failures. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum GeolocationError {
    #[error("permission denied")]
    Denied,
    #[error("location unavailable")]
    Unavailable,
    #[error("timed out")]
    Timeout,
    #[error("could not get current location: {0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ScheduleError {
    #[error("unparsable time {0:?}, expected HH:MM")]
    UnparsableTime(String),
    #[error("stop {index} out of range for itinerary of {len} stops")]
    StopOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum LifecycleError {
    #[error("cannot move route from {from:?} to {to:?}")]
    InvalidTransition { from: RouteStatus, to: RouteStatus },
    #[error("stop {index} out of range for route of {len} stops")]
    StopOutOfRange { index: usize, len: usize },
}
