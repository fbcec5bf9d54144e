//! Route model shared by routing backends and the planner.

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub polyline: Polyline,
}

impl Route {
    pub fn new(distance_miles: f64, duration_hours: f64, polyline: Polyline) -> Self {
        Self {
            distance_miles,
            duration_hours,
            polyline,
        }
    }

    /// Deterministic stand-in used whenever a real route is unavailable.
    ///
    /// Los Angeles to Las Vegas along I-15, coarsely sampled.
    pub fn placeholder() -> Self {
        Self {
            distance_miles: 436.0,
            duration_hours: 7.5,
            polyline: Polyline::new(vec![
                (-118.2437, 34.0522),
                (-117.9153, 34.1064),
                (-117.6006, 34.2417),
                (-117.2902, 34.4138),
                (-116.9655, 34.5753),
                (-116.6108, 34.7417),
                (-116.2555, 34.8729),
                (-115.9518, 35.0456),
                (-115.6149, 35.2077),
                (-115.1398, 36.1699),
            ]),
        }
    }

    /// Distance usable for planning: negative or non-finite values count as zero.
    pub fn planning_miles(&self) -> f64 {
        if self.distance_miles.is_finite() {
            self.distance_miles.max(0.0)
        } else {
            0.0
        }
    }
}
