//! Hours-of-Service trip planner.
//!
//! Places break and fuel stops along a truck route, simulates the
//! multi-day duty schedule under daily driving and shift caps, and reports
//! 70-hour cycle compliance.

pub mod config;
pub mod error;
pub mod fallback;
pub mod haversine;
pub mod location;
pub mod ors;
pub mod osrm;
pub mod polyline;
pub mod route;
pub mod scheduler;
pub mod server;
pub mod stop_planner;
pub mod summary;
pub mod traits;
pub mod trip;

pub(crate) const METERS_PER_MILE: f64 = 1609.344;
pub(crate) const SECONDS_PER_HOUR: f64 = 3600.0;

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
