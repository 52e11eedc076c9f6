//! Route orchestration: order the stops, then ask the routing provider for the road route.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RouteError;
use crate::point::GeoPoint;
use crate::polyline::Polyline;
use crate::solver::{self, SolveOptions};
use crate::tour::Tour;
use crate::traits::{RouteRequest, RoutingProvider};

/// Shared flag a supervising caller flips to abandon an in-flight plan.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Reorder the stops before routing. When false the input order is kept.
    pub optimize_order: bool,
    /// Upper bound for the routing provider call.
    pub timeout: Option<Duration>,
    pub cancel: Option<CancelToken>,
}

impl PlanOptions {
    pub fn optimized() -> Self {
        Self {
            optimize_order: true,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// A computed route. Replaced wholesale, never edited, when inputs change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Road distance reported by the provider.
    pub distance_meters: f64,
    /// Road duration reported by the provider.
    pub duration_seconds: f64,
    pub polyline: Polyline,
    /// Final visiting order. Downstream scheduling and storage must use this.
    pub ordered_points: Tour,
}

/// Stateless planner over a routing provider.
#[derive(Debug, Clone)]
pub struct RoutePlanner<P> {
    provider: P,
    solve_options: SolveOptions,
}

impl<P: RoutingProvider> RoutePlanner<P> {
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, SolveOptions::default())
    }

    pub fn with_options(provider: P, solve_options: SolveOptions) -> Self {
        Self {
            provider,
            solve_options,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Plans a route from `origin` through every point.
    ///
    /// Validation failures return before any provider call. Provider failures
    /// are returned as-is; there is no retry.
    pub fn plan(
        &self,
        origin: Option<&GeoPoint>,
        points: &[GeoPoint],
        options: &PlanOptions,
    ) -> Result<RoutePlan, RouteError> {
        let origin = origin.ok_or(RouteError::MissingOrigin)?;
        if points.is_empty() {
            return Err(RouteError::EmptyPointSet);
        }
        if let Some(invalid) = std::iter::once(origin)
            .chain(points)
            .find(|point| !point.has_valid_coordinates())
        {
            return Err(RouteError::InvalidCoordinates {
                id: invalid.id.clone(),
            });
        }

        info!(
            points = points.len(),
            optimize = options.optimize_order,
            "planning route"
        );

        let ordered_points = if options.optimize_order && points.len() > 1 {
            let tour = solver::optimize(origin, points, &self.solve_options);
            debug!(order = ?tour.ids(), "optimized visiting order");
            tour
        } else {
            Tour::new(points.to_vec())
        };

        if options.is_cancelled() {
            return Err(RouteError::Cancelled);
        }

        let waypoints: Vec<(f64, f64)> = std::iter::once(origin)
            .chain(ordered_points.points())
            .map(GeoPoint::coords)
            .collect();

        let request = RouteRequest {
            timeout: options.timeout,
            cancel: options.cancel.as_ref(),
        };
        let route = self.provider.route(&waypoints, &request)?;

        if options.is_cancelled() {
            return Err(RouteError::Cancelled);
        }

        info!(
            distance_m = route.distance_meters,
            duration_s = route.duration_seconds,
            "route planned"
        );

        Ok(RoutePlan {
            distance_meters: route.distance_meters,
            duration_seconds: route.duration_seconds,
            polyline: route.polyline,
            ordered_points,
        })
    }
}
