//! Scripted routing provider.

#![allow(dead_code)]

use std::cell::RefCell;

use field_route_planner::error::RouteError;
use field_route_planner::osrm::parse_route_response;
use field_route_planner::planner::CancelToken;
use field_route_planner::polyline::Polyline;
use field_route_planner::traits::{ProviderRoute, RouteRequest, RoutingProvider};
use reqwest::StatusCode;

/// Answers every request with a canned OSRM body and records the waypoints.
pub struct ScriptedProvider {
    status: StatusCode,
    body: String,
    cancel_on_call: Option<CancelToken>,
    pub calls: RefCell<Vec<Vec<(f64, f64)>>>,
}

impl ScriptedProvider {
    pub fn responding(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            cancel_on_call: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A successful response whose geometry is the waypoints themselves.
    pub fn ok() -> Self {
        Self::responding(StatusCode::OK, "")
    }

    /// Flips `token` while the request is in flight, then answers normally.
    pub fn cancelling(mut self, token: CancelToken) -> Self {
        self.cancel_on_call = Some(token);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl RoutingProvider for ScriptedProvider {
    fn route(
        &self,
        waypoints: &[(f64, f64)],
        request: &RouteRequest<'_>,
    ) -> Result<ProviderRoute, RouteError> {
        self.calls.borrow_mut().push(waypoints.to_vec());
        if request.is_cancelled() {
            return Err(RouteError::Cancelled);
        }
        if let Some(token) = &self.cancel_on_call {
            token.cancel();
        }
        if self.body.is_empty() {
            return Ok(ProviderRoute {
                distance_meters: 12_345.0,
                duration_seconds: 1_800.0,
                polyline: Polyline::new(waypoints.to_vec()),
            });
        }
        parse_route_response(self.status, &self.body)
    }
}
