//! Places mandatory break and fuel stops along a route.
//!
//! Breaks fall every 400 miles and fuel every 1000 miles, located on the
//! route polyline. A fuel stop within 10 miles of a break absorbs it and
//! becomes a combined 45-minute stop.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::location::Location;
use crate::round2;
use crate::route::Route;

pub const BREAK_INTERVAL_MILES: f64 = 400.0;
pub const FUEL_INTERVAL_MILES: f64 = 1000.0;
/// Maximum mile distance between a fuel stop and a break it absorbs.
pub const MERGE_WINDOW_MILES: f64 = 10.0;
pub const COMBINED_BREAK_MINUTES: u32 = 45;
pub const COMBINED_BREAK_REASON: &str = "Fuel + 30-min break";

/// Variant order doubles as the tie-break at equal mile (break before fuel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopType {
    Pickup,
    Break,
    Fuel,
    Dropoff,
}

impl StopType {
    pub fn as_str(self) -> &'static str {
        match self {
            StopType::Pickup => "pickup",
            StopType::Break => "break",
            StopType::Fuel => "fuel",
            StopType::Dropoff => "dropoff",
        }
    }

    fn is_interval(self) -> bool {
        matches!(self, StopType::Break | StopType::Fuel)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    #[serde(rename = "type")]
    pub stop_type: StopType,
    pub lng: f64,
    pub lat: f64,
    pub mile: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub eld_required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub combined_break: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl Stop {
    pub fn new(stop_type: StopType, coord: (f64, f64), mile: f64) -> Self {
        Self {
            stop_type,
            lng: coord.0,
            lat: coord.1,
            mile: round2(mile),
            label: None,
            eld_required: false,
            combined_break: false,
            reason: None,
            duration_minutes: None,
        }
    }

    pub fn with_label(mut self, label: Option<&str>) -> Self {
        self.label = label.map(str::to_string);
        self
    }

    pub fn coord(&self) -> (f64, f64) {
        (self.lng, self.lat)
    }

    /// Turns a fuel stop into a combined fuel + 30-minute break stop.
    fn absorb_break(&mut self) {
        self.combined_break = true;
        self.reason = Some(COMBINED_BREAK_REASON.to_string());
        self.duration_minutes = Some(COMBINED_BREAK_MINUTES);
        self.eld_required = true;
    }
}

/// Identity used to drop repeated stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum StopKey {
    Interval(StopType, i64),
    Endpoint(StopType, i64, i64),
}

impl StopKey {
    fn of(stop: &Stop) -> Self {
        if stop.stop_type.is_interval() {
            StopKey::Interval(stop.stop_type, stop.mile.round() as i64)
        } else {
            StopKey::Endpoint(stop.stop_type, micro_degrees(stop.lng), micro_degrees(stop.lat))
        }
    }
}

fn micro_degrees(value: f64) -> i64 {
    (value * 1e6).round() as i64
}

/// Ordered stop list under construction, deduplicated by [`StopKey`].
#[derive(Debug, Default)]
struct StopList {
    stops: Vec<Stop>,
    seen: HashSet<StopKey>,
}

impl StopList {
    /// Adds an interval stop unless one with the same key exists.
    fn push_unique(&mut self, stop: Stop) {
        if self.seen.insert(StopKey::of(&stop)) {
            self.stops.push(stop);
        }
    }

    /// Adds a pickup or dropoff unconditionally.
    fn push_endpoint(&mut self, stop: Stop) {
        self.seen.insert(StopKey::of(&stop));
        self.stops.push(stop);
    }
}

/// Plans the ordered stop list for a trip.
///
/// The result is `pickup, break/fuel stops by mile, dropoff`. Endpoints with
/// unknown coordinates are left out instead of failing.
pub fn plan_stops(route: &Route, pickup: &Location, dropoff: &Location) -> Vec<Stop> {
    let distance_miles = route.planning_miles();
    let polyline = &route.polyline;
    let mut list = StopList::default();

    if polyline.len() < 2 {
        if let Some(coord) = pickup.coord() {
            list.push_endpoint(Stop::new(StopType::Pickup, coord, 0.0).with_label(pickup.label()));
        }
        if let Some(coord) = dropoff.coord() {
            list.push_endpoint(
                Stop::new(StopType::Dropoff, coord, distance_miles).with_label(dropoff.label()),
            );
        }
        debug!(stops = list.stops.len(), "degenerate polyline, endpoints only");
        return list.stops;
    }

    let (Some(start), Some(end)) = (polyline.first(), polyline.last()) else {
        return list.stops;
    };

    list.push_endpoint(Stop::new(StopType::Pickup, start, 0.0).with_label(pickup.label()));

    for (mile, stop_type) in interval_targets(distance_miles) {
        let Some(point) = polyline.point_at_mile(mile) else {
            continue;
        };
        let mut stop = Stop::new(stop_type, point, mile);
        stop.eld_required = stop_type == StopType::Break;
        list.push_unique(stop);
    }

    let mut stops = merge_breaks_into_fuel(list.stops);

    stops.push(Stop::new(StopType::Dropoff, end, distance_miles).with_label(dropoff.label()));

    debug!(
        distance_miles,
        stops = stops.len(),
        "planned interval stops"
    );
    stops
}

/// Break and fuel candidates strictly before the end of the route, ordered
/// by mile with breaks first at equal miles.
fn interval_targets(distance_miles: f64) -> Vec<(f64, StopType)> {
    let mut targets = Vec::new();

    for (interval, stop_type) in [
        (BREAK_INTERVAL_MILES, StopType::Break),
        (FUEL_INTERVAL_MILES, StopType::Fuel),
    ] {
        let mut mile = interval;
        while mile < distance_miles {
            targets.push((mile, stop_type));
            mile += interval;
        }
    }

    targets.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    targets
}

/// Lets each fuel stop, in mile order, claim the nearest unclaimed break
/// within [`MERGE_WINDOW_MILES`]. Claimed breaks are removed.
fn merge_breaks_into_fuel(mut stops: Vec<Stop>) -> Vec<Stop> {
    let indices_of = |stop_type: StopType, stops: &[Stop]| -> Vec<usize> {
        stops
            .iter()
            .enumerate()
            .filter(|(_, stop)| stop.stop_type == stop_type)
            .map(|(idx, _)| idx)
            .collect()
    };
    let fuel_indices = indices_of(StopType::Fuel, &stops);
    let break_indices = indices_of(StopType::Break, &stops);
    let mut claimed = vec![false; stops.len()];

    for fuel_idx in fuel_indices {
        let fuel_mile = stops[fuel_idx].mile;
        let mut best: Option<(usize, f64)> = None;

        for &break_idx in &break_indices {
            if claimed[break_idx] {
                continue;
            }
            let delta = (stops[break_idx].mile - fuel_mile).abs();
            if delta <= MERGE_WINDOW_MILES && best.is_none_or(|(_, best_delta)| delta < best_delta) {
                best = Some((break_idx, delta));
            }
        }

        if let Some((break_idx, _)) = best {
            claimed[break_idx] = true;
            stops[fuel_idx].absorb_break();
        }
    }

    stops
        .into_iter()
        .zip(claimed)
        .filter(|(_, claimed)| !claimed)
        .map(|(stop, _)| stop)
        .collect()
}
