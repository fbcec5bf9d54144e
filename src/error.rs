//! Error types for route acquisition and configuration.

use thiserror::Error;

/// Failure while fetching a route from a routing backend.
///
/// Never escapes the planning pipeline: the fallback provider turns every
/// variant into the placeholder route.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("routing backend returned status {0}")]
    Status(u16),

    #[error("unexpected routing response: {0}")]
    UnexpectedResponse(String),

    #[error("invalid route geometry: {0}")]
    InvalidGeometry(String),

    #[error("routing backend is not configured")]
    NotConfigured,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}
