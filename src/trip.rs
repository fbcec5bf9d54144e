//! The planning operation: route, stops, day logs and summary for a trip.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::fallback::FallbackRouteProvider;
use crate::location::{Location, number};
use crate::polyline::Polyline;
use crate::route::Route;
use crate::scheduler::{DayLog, Remark, generate_logs};
use crate::stop_planner::{Stop, StopType, plan_stops};
use crate::summary::compute_summary;
use crate::traits::RouteProvider;

/// A planning request as sent by clients.
///
/// Fields are kept as raw JSON so malformed values degrade to unknown
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripRequest {
    #[serde(default)]
    pub current_location: Value,
    #[serde(default)]
    pub pickup_location: Value,
    #[serde(default)]
    pub dropoff_location: Value,
    #[serde(default)]
    pub cycle_used_hours: Value,
}

impl TripRequest {
    /// Reads a request out of an arbitrary JSON body. Non-objects and
    /// unexpected shapes yield an empty request.
    pub fn from_value(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }

    pub fn current(&self) -> Location {
        Location::from_value(&self.current_location)
    }

    pub fn pickup(&self) -> Location {
        Location::from_value(&self.pickup_location)
    }

    pub fn dropoff(&self) -> Location {
        Location::from_value(&self.dropoff_location)
    }

    /// Hours already used in the current cycle; unparsable values count as zero.
    pub fn cycle_used_hours(&self) -> f64 {
        number(&self.cycle_used_hours).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_miles: f64,
    pub polyline: Polyline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    pub total_days: usize,
    pub total_miles: f64,
    pub driving_hours: f64,
    pub hos_compliant: bool,
    pub hos_reasons: Vec<String>,
    pub cycle_remaining_hours_before: f64,
    pub cycle_remaining_hours_after: f64,
}

/// A remark placed on the whole-trip timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineStop {
    pub day: u32,
    #[serde(flatten)]
    pub remark: Remark,
    pub eld_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    pub route: RouteSummary,
    pub summary: TripSummary,
    pub stops: Vec<Stop>,
    pub timeline_stops: Vec<TimelineStop>,
    pub logs: Vec<DayLog>,
}

/// Plans a trip, fetching the route through `provider`.
pub fn plan_trip<P: RouteProvider>(
    request: &TripRequest,
    provider: &FallbackRouteProvider<P>,
) -> TripPlan {
    let current = request.current();
    let pickup = request.pickup();
    let dropoff = request.dropoff();

    info!(
        current = %current.label,
        pickup = %pickup.label,
        dropoff = %dropoff.label,
        backend = provider.name(),
        "planning trip"
    );

    let route = provider.route_between(&pickup, &dropoff);
    plan_route(route, &pickup, &dropoff, request.cycle_used_hours())
}

/// Runs stop placement, scheduling and summary over a known route.
pub fn plan_route(
    route: Route,
    pickup: &Location,
    dropoff: &Location,
    cycle_used_hours: f64,
) -> TripPlan {
    let stops = plan_stops(&route, pickup, dropoff);
    let logs = generate_logs(&route, &stops);
    let hos = compute_summary(&logs, cycle_used_hours);
    let timeline_stops = timeline(&logs);

    debug!(
        distance_miles = route.distance_miles,
        stops = stops.len(),
        days = logs.len(),
        hos_compliant = hos.hos_compliant,
        "trip planned"
    );

    TripPlan {
        summary: TripSummary {
            total_days: logs.len(),
            total_miles: route.distance_miles,
            driving_hours: hos.driving_hours,
            hos_compliant: hos.hos_compliant,
            hos_reasons: hos.hos_reasons,
            cycle_remaining_hours_before: hos.cycle_remaining_hours_before,
            cycle_remaining_hours_after: hos.cycle_remaining_hours_after,
        },
        route: RouteSummary {
            distance_miles: route.distance_miles,
            polyline: route.polyline,
        },
        stops,
        timeline_stops,
        logs,
    }
}

/// Plans independent trips in parallel. Output order follows input order.
pub fn plan_trips<P>(requests: &[TripRequest], provider: &FallbackRouteProvider<P>) -> Vec<TripPlan>
where
    P: RouteProvider + Sync,
{
    requests
        .par_iter()
        .map(|request| plan_trip(request, provider))
        .collect()
}

/// Every remark of every day, ordered by `(day, minute)`.
fn timeline(logs: &[DayLog]) -> Vec<TimelineStop> {
    let mut timeline: Vec<TimelineStop> = logs
        .iter()
        .flat_map(|log| {
            log.remarks.iter().map(|remark| TimelineStop {
                day: log.day,
                eld_required: remark.stop_type == StopType::Break || remark.eld_required,
                remark: remark.clone(),
            })
        })
        .collect();

    timeline.sort_by_key(|stop| (stop.day, stop.remark.minute));
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_parses_permissively() {
        let request = TripRequest::from_value(json!({
            "current_location": "Los Angeles, CA",
            "pickup_location": {"label": "Barstow", "lng": "-117.0173", "lat": 34.8958},
            "dropoff_location": 17,
            "cycle_used_hours": "12.5"
        }));
        assert_eq!(request.current().label, "Los Angeles, CA");
        assert_eq!(request.pickup().coord(), Some((-117.0173, 34.8958)));
        assert_eq!(request.dropoff(), Location::default());
        assert_eq!(request.cycle_used_hours(), 12.5);
    }

    #[test]
    fn test_request_from_non_object_is_empty() {
        let request = TripRequest::from_value(json!(["nope"]));
        assert_eq!(request.cycle_used_hours(), 0.0);
        assert_eq!(request.pickup(), Location::default());
    }

    #[test]
    fn test_bad_cycle_hours_default_to_zero() {
        let request = TripRequest::from_value(json!({"cycle_used_hours": "lots"}));
        assert_eq!(request.cycle_used_hours(), 0.0);
    }

    #[test]
    fn test_timeline_sorted_by_day_then_minute() {
        let remark = |minute: u32, stop_type: StopType| Remark {
            minute,
            start_minute: minute,
            end_minute: minute + 30,
            abbr: "LOC".to_string(),
            stop_type,
            reason: "Stop".to_string(),
            lng: None,
            lat: None,
            eld_required: false,
        };
        let logs = vec![
            DayLog {
                day: 2,
                events: Vec::new(),
                remarks: vec![remark(10, StopType::Dropoff)],
            },
            DayLog {
                day: 1,
                events: Vec::new(),
                remarks: vec![remark(500, StopType::Break), remark(0, StopType::Pickup)],
            },
        ];

        let timeline = timeline(&logs);
        let order: Vec<(u32, u32)> = timeline.iter().map(|s| (s.day, s.remark.minute)).collect();
        assert_eq!(order, vec![(1, 0), (1, 500), (2, 10)]);
        assert!(timeline[1].eld_required);
        assert!(!timeline[0].eld_required);
    }
}
