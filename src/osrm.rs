//! OSRM HTTP adapter for road routes.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::RouteError;
use crate::polyline::Polyline;
use crate::traits::{ProviderRoute, RouteRequest, RoutingProvider};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    /// Defaults overridden by `OSRM_BASE_URL`, `OSRM_PROFILE` and `OSRM_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("OSRM_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(profile) = std::env::var("OSRM_PROFILE") {
            config.profile = profile;
        }
        if let Some(secs) = std::env::var("OSRM_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            config.timeout_secs = secs;
        }
        config
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    /// Route service URL for (lat, lng) waypoints.
    pub fn route_url(&self, waypoints: &[(f64, f64)]) -> String {
        let coords = waypoints
            .iter()
            .map(|(lat, lng)| format!("{:.6},{:.6}", lng, lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson&steps=true",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl RoutingProvider for OsrmClient {
    fn route(
        &self,
        waypoints: &[(f64, f64)],
        request: &RouteRequest<'_>,
    ) -> Result<ProviderRoute, RouteError> {
        if request.is_cancelled() {
            return Err(RouteError::Cancelled);
        }

        let url = self.route_url(waypoints);
        debug!(%url, waypoints = waypoints.len(), "requesting OSRM route");

        let mut builder = self.client.get(&url);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().map_err(transport_error)?;
        let status = response.status();
        let body = response.text().map_err(transport_error)?;

        if request.is_cancelled() {
            return Err(RouteError::Cancelled);
        }

        parse_route_response(status, &body).inspect_err(|err| {
            warn!(%status, error = %err, "OSRM route request failed");
        })
    }
}

fn transport_error(err: reqwest::Error) -> RouteError {
    if err.is_timeout() {
        RouteError::Timeout
    } else {
        RouteError::Http(err)
    }
}

/// Interprets an OSRM route service response.
///
/// A non-2xx status, a `code` other than `"Ok"` or an empty `routes` list is a
/// provider error carrying the upstream message where there is one.
pub fn parse_route_response(status: StatusCode, body: &str) -> Result<ProviderRoute, RouteError> {
    let parsed = serde_json::from_str::<OsrmRouteResponse>(body);

    if !status.is_success() {
        let message = parsed
            .ok()
            .and_then(|body| body.message.or(body.code))
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(RouteError::provider(message));
    }

    let body = parsed
        .map_err(|err| RouteError::provider(format!("malformed route response: {}", err)))?;

    let code = body.code.as_deref().unwrap_or_default();
    if code != "Ok" {
        let message = body.message.unwrap_or_else(|| code.to_string());
        return Err(RouteError::provider(message));
    }

    let route = body
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RouteError::provider("no route found"))?;

    Ok(ProviderRoute {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        polyline: Polyline::from_lng_lat(&route.geometry.coordinates),
    })
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}
