//! Runtime configuration read from the environment.

use std::net::SocketAddr;

use tracing::warn;

use crate::error::{ConfigError, RouteError};
use crate::fallback::FallbackRouteProvider;
use crate::ors::{OrsClient, OrsConfig};
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::traits::RouteProvider;

/// Routing backend chosen at startup.
pub type DynRouteProvider = Box<dyn RouteProvider + Send + Sync>;

/// Which routing backend serves planning requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteBackend {
    OpenRouteService,
    Osrm,
    /// Always use the placeholder route.
    Placeholder,
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub backend: RouteBackend,
    pub ors: OrsConfig,
    pub osrm: OsrmConfig,
    pub bind_addr: SocketAddr,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            backend: RouteBackend::OpenRouteService,
            ors: OrsConfig::default(),
            osrm: OsrmConfig::default(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

impl PlannerConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source; unset variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = var("ROUTE_BACKEND") {
            config.backend = match value.to_ascii_lowercase().as_str() {
                "ors" | "openrouteservice" => RouteBackend::OpenRouteService,
                "osrm" => RouteBackend::Osrm,
                "placeholder" | "mock" => RouteBackend::Placeholder,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "ROUTE_BACKEND",
                        expected: "one of ors, osrm, placeholder",
                        value,
                    });
                }
            };
        }

        if let Some(api_key) = var("ORS_API_KEY") {
            config.ors.api_key = api_key;
        }
        if let Some(base_url) = var("ORS_BASE_URL") {
            config.ors.base_url = base_url;
        }
        if let Some(base_url) = var("OSRM_BASE_URL") {
            config.osrm.base_url = base_url;
        }
        if let Some(profile) = var("OSRM_PROFILE") {
            config.osrm.profile = profile;
        }

        if let Some(value) = var("ROUTE_TIMEOUT_SECS") {
            let timeout_secs = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: "ROUTE_TIMEOUT_SECS",
                expected: "a whole number of seconds",
                value: value.clone(),
            })?;
            config.ors.timeout_secs = timeout_secs;
            config.osrm.timeout_secs = timeout_secs;
        }

        if let Some(value) = var("BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "BIND_ADDR",
                expected: "a socket address such as 127.0.0.1:8000",
                value: value.clone(),
            })?;
        }

        Ok(config)
    }

    /// Builds the configured routing backend behind the placeholder fallback.
    ///
    /// Must be called outside an async runtime: the HTTP clients are blocking.
    pub fn route_provider(&self) -> Result<FallbackRouteProvider<DynRouteProvider>, RouteError> {
        let provider = match self.backend {
            RouteBackend::OpenRouteService if self.ors.api_key.is_empty() => {
                warn!("ORS_API_KEY is not set, every trip will use the placeholder route");
                return Ok(FallbackRouteProvider::placeholder_only());
            }
            RouteBackend::OpenRouteService => {
                Box::new(OrsClient::new(self.ors.clone())?) as DynRouteProvider
            }
            RouteBackend::Osrm => Box::new(OsrmClient::new(self.osrm.clone())?) as DynRouteProvider,
            RouteBackend::Placeholder => return Ok(FallbackRouteProvider::placeholder_only()),
        };
        Ok(FallbackRouteProvider::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = PlannerConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config.backend, RouteBackend::OpenRouteService);
        assert!(config.ors.api_key.is_empty());
        assert_eq!(config.osrm.base_url, "http://localhost:5000");
        assert_eq!(config.bind_addr.port(), 8000);
    }

    #[test]
    fn test_reads_backend_and_timeouts() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("ROUTE_BACKEND", "OSRM"),
            ("OSRM_BASE_URL", "http://osrm:5000"),
            ("ROUTE_TIMEOUT_SECS", "3"),
            ("BIND_ADDR", "0.0.0.0:9000"),
        ]))
        .expect("config");
        assert_eq!(config.backend, RouteBackend::Osrm);
        assert_eq!(config.osrm.base_url, "http://osrm:5000");
        assert_eq!(config.osrm.timeout_secs, 3);
        assert_eq!(config.ors.timeout_secs, 3);
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = PlannerConfig::from_lookup(lookup(&[("ORS_API_KEY", "  ")])).expect("config");
        assert!(config.ors.api_key.is_empty());
    }

    #[test]
    fn test_missing_api_key_builds_placeholder_provider() {
        let config = PlannerConfig::from_lookup(lookup(&[])).expect("config");
        let provider = config.route_provider().expect("provider");
        assert_eq!(provider.name(), "placeholder");
    }

    #[test]
    fn test_osrm_backend_provider_name() {
        let config = PlannerConfig::from_lookup(lookup(&[("ROUTE_BACKEND", "osrm")])).expect("config");
        let provider = config.route_provider().expect("provider");
        assert_eq!(provider.name(), "osrm");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(PlannerConfig::from_lookup(lookup(&[("ROUTE_TIMEOUT_SECS", "soon")])).is_err());
        assert!(PlannerConfig::from_lookup(lookup(&[("ROUTE_BACKEND", "carrier-pigeon")])).is_err());
        assert!(PlannerConfig::from_lookup(lookup(&[("BIND_ADDR", "localhost")])).is_err());
    }
}
