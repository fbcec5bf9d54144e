//! OSRM HTTP adapter for driving routes.

use serde::Deserialize;
use tracing::debug;

use crate::error::RouteError;
use crate::polyline::Polyline;
use crate::round2;
use crate::route::Route;
use crate::traits::RouteProvider;
use crate::{METERS_PER_MILE, SECONDS_PER_HOUR};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, RouteError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, from: (f64, f64), to: (f64, f64)) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.0,
            from.1,
            to.0,
            to.1
        )
    }
}

impl RouteProvider for OsrmClient {
    fn route_for(&self, from: (f64, f64), to: (f64, f64)) -> Result<Route, RouteError> {
        let url = self.route_url(from, to);
        debug!(%url, "requesting OSRM route");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RouteError::Status(status.as_u16()));
        }

        let body = response.json::<OsrmRouteResponse>()?;
        body.into_route()
    }

    fn name(&self) -> &str {
        "osrm"
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
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
    coordinates: Vec<(f64, f64)>,
}

impl OsrmRouteResponse {
    fn into_route(self) -> Result<Route, RouteError> {
        if self.code != "Ok" {
            return Err(RouteError::UnexpectedResponse(format!("OSRM code {}", self.code)));
        }
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouteError::UnexpectedResponse("OSRM returned no routes".to_string()))?;

        Ok(Route::new(
            round2(route.distance / METERS_PER_MILE),
            round2(route.duration / SECONDS_PER_HOUR),
            Polyline::new(route.geometry.coordinates),
        ))
    }
}
