//! OpenRouteService directions adapter.
//!
//! The directions endpoint answers in one of two shapes depending on the
//! requested format: GeoJSON `features`, or JSON `routes` with an encoded
//! polyline geometry. Both are accepted.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::RouteError;
use crate::polyline::Polyline;
use crate::round2;
use crate::route::Route;
use crate::traits::RouteProvider;
use crate::{METERS_PER_MILE, SECONDS_PER_HOUR};

#[derive(Debug, Clone)]
pub struct OrsConfig {
    pub base_url: String,
    pub profile: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openrouteservice.org".to_string(),
            profile: "driving-car".to_string(),
            api_key: String::new(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrsClient {
    config: OrsConfig,
    client: reqwest::blocking::Client,
}

impl OrsClient {
    pub fn new(config: OrsConfig) -> Result<Self, RouteError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile
        )
    }
}

impl RouteProvider for OrsClient {
    fn route_for(&self, from: (f64, f64), to: (f64, f64)) -> Result<Route, RouteError> {
        if self.config.api_key.is_empty() {
            return Err(RouteError::NotConfigured);
        }

        let url = self.directions_url();
        debug!(%url, "requesting OpenRouteService route");

        let payload = json!({
            "coordinates": [[from.0, from.1], [to.0, to.1]],
        });
        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, &self.config.api_key)
            .json(&payload)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RouteError::Status(status.as_u16()));
        }

        let body = response.json::<OrsResponse>()?;
        body.into_route()
    }

    fn name(&self) -> &str {
        "openrouteservice"
    }
}

#[derive(Debug, Deserialize)]
struct OrsResponse {
    #[serde(default)]
    features: Vec<OrsFeature>,
    #[serde(default)]
    routes: Vec<OrsRoute>,
}

#[derive(Debug, Deserialize)]
struct OrsFeature {
    properties: OrsProperties,
    geometry: OrsLineString,
}

#[derive(Debug, Deserialize)]
struct OrsProperties {
    summary: OrsSummary,
}

#[derive(Debug, Deserialize)]
struct OrsLineString {
    coordinates: Vec<(f64, f64)>,
}

#[derive(Debug, Deserialize)]
struct OrsRoute {
    summary: OrsSummary,
    geometry: String,
}

/// ORS omits both fields for zero-length routes.
#[derive(Debug, Deserialize)]
struct OrsSummary {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

impl OrsResponse {
    fn into_route(self) -> Result<Route, RouteError> {
        let (summary, polyline) = if let Some(feature) = self.features.into_iter().next() {
            (
                feature.properties.summary,
                Polyline::new(feature.geometry.coordinates),
            )
        } else if let Some(route) = self.routes.into_iter().next() {
            let polyline = Polyline::decode(&route.geometry)?;
            (route.summary, polyline)
        } else {
            return Err(RouteError::UnexpectedResponse(
                "neither features nor routes present".to_string(),
            ));
        };

        Ok(Route::new(
            round2(summary.distance / METERS_PER_MILE),
            round2(summary.duration / SECONDS_PER_HOUR),
            polyline,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_geojson_shape() {
        let body: OrsResponse = serde_json::from_str(
            r#"{"type":"FeatureCollection","features":[{"type":"Feature",
                "properties":{"summary":{"distance":160934.4,"duration":7200}},
                "geometry":{"type":"LineString","coordinates":[[-118.0,34.0],[-117.0,34.5]]}}]}"#,
        )
        .expect("parse");
        let route = body.into_route().expect("route");
        assert_eq!(route.distance_miles, 100.0);
        assert_eq!(route.duration_hours, 2.0);
        assert_eq!(route.polyline.points(), &[(-118.0, 34.0), (-117.0, 34.5)]);
    }

    #[test]
    fn test_parses_encoded_routes_shape() {
        let body: OrsResponse = serde_json::from_str(
            r#"{"routes":[{"summary":{"distance":1609.344,"duration":60},
                "geometry":"_p~iF~ps|U_ulLnnqC"}]}"#,
        )
        .expect("parse");
        let route = body.into_route().expect("route");
        assert_eq!(route.distance_miles, 1.0);
        assert_eq!(route.duration_hours, 0.02);
        assert_eq!(route.polyline.len(), 2);
    }

    #[test]
    fn test_empty_response_is_error() {
        let body: OrsResponse = serde_json::from_str(r#"{"error":"nope"}"#).expect("parse");
        assert!(matches!(body.into_route(), Err(RouteError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_missing_api_key_is_not_configured() {
        let client = OrsClient::new(OrsConfig::default()).expect("client");
        let result = client.route_for((-118.0, 34.0), (-115.0, 36.0));
        assert!(matches!(result, Err(RouteError::NotConfigured)));
    }
}
