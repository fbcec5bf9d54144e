//! Test fixtures for hos-trip-planner.
//!
//! Provides:
//! - Real city coordinates along western US freight corridors
//! - Straight-line route builders of an exact length
//! - An in-memory route provider

#![allow(dead_code)]

pub mod cities;

pub use cities::*;

use hos_trip_planner::error::RouteError;
use hos_trip_planner::haversine::EARTH_RADIUS_MILES;
use hos_trip_planner::location::Location;
use hos_trip_planner::polyline::Polyline;
use hos_trip_planner::route::Route;
use hos_trip_planner::scheduler::{DayLog, DutyStatus, MINUTES_PER_DAY};
use hos_trip_planner::stop_planner::{Stop, StopType};
use hos_trip_planner::traits::RouteProvider;

/// Miles covered by one degree of longitude along the equator.
pub fn miles_per_degree() -> f64 {
    EARTH_RADIUS_MILES.to_radians()
}

/// A polyline heading due east along the equator, one point every
/// `step_miles`, whose haversine length is `total_miles`.
pub fn equator_polyline(total_miles: f64, step_miles: f64) -> Polyline {
    let per_degree = miles_per_degree();
    let mut points = Vec::new();
    let mut current = 0.0;

    while current < total_miles {
        points.push((current / per_degree, 0.0));
        current += step_miles;
    }
    points.push((total_miles / per_degree, 0.0));

    Polyline::new(points)
}

pub fn equator_route(total_miles: f64) -> Route {
    Route::new(total_miles, total_miles / 50.0, equator_polyline(total_miles, 100.0))
}

/// Pickup and dropoff placed on the ends of the route polyline.
pub fn endpoints(route: &Route) -> (Location, Location) {
    let start = route.polyline.first().unwrap_or_default();
    let end = route.polyline.last().unwrap_or_default();
    (
        Location::new("pickup", start.0, start.1),
        Location::new("dropoff", end.0, end.1),
    )
}

pub fn stop_types(stops: &[Stop]) -> Vec<StopType> {
    stops.iter().map(|stop| stop.stop_type).collect()
}

/// A stop with explicit mile and coordinates, as a client might supply.
pub fn stop(stop_type: StopType, lng: f64, lat: f64, mile: f64) -> Stop {
    Stop::new(stop_type, (lng, lat), mile)
}

/// Asserts the day's events cover `[0, 1440)` without gaps or overlaps.
pub fn assert_day_is_24h(day: &DayLog) {
    assert!(!day.events.is_empty(), "day {} has no events", day.day);
    assert_eq!(day.events[0].start_minute, 0, "day {} starts late", day.day);
    assert_eq!(
        day.events.last().map(|event| event.end_minute),
        Some(MINUTES_PER_DAY),
        "day {} ends early",
        day.day
    );

    let mut last_end = 0;
    for event in &day.events {
        assert_eq!(event.start_minute, last_end, "gap or overlap on day {}", day.day);
        assert!(event.end_minute > event.start_minute, "empty event on day {}", day.day);
        last_end = event.end_minute;
    }
}

pub fn driving_minutes(day: &DayLog) -> u32 {
    day.minutes_with(DutyStatus::Driving)
}

pub fn shift_minutes(day: &DayLog) -> u32 {
    day.minutes_with(DutyStatus::Driving) + day.minutes_with(DutyStatus::OnDuty)
}

/// Route provider returning a fixed route, or failing when none is set.
pub struct StaticRouteProvider {
    pub route: Option<Route>,
}

impl StaticRouteProvider {
    pub fn returning(route: Route) -> Self {
        Self { route: Some(route) }
    }

    pub fn failing() -> Self {
        Self { route: None }
    }
}

impl RouteProvider for StaticRouteProvider {
    fn route_for(&self, _from: (f64, f64), _to: (f64, f64)) -> Result<Route, RouteError> {
        self.route
            .clone()
            .ok_or_else(|| RouteError::UnexpectedResponse("no fixture route".to_string()))
    }

    fn name(&self) -> &str {
        "static"
    }
}
