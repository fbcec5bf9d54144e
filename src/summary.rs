//! Cycle compliance totals for a planned trip.

use serde::{Deserialize, Serialize};

use crate::round2;
use crate::scheduler::{DayLog, DutyStatus};

/// The rolling 70-hour / 8-day on-duty limit.
pub const CYCLE_LIMIT_HOURS: f64 = 70.0;
pub const INSUFFICIENT_CYCLE_REASON: &str = "Insufficient cycle hours remaining";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HosSummary {
    pub driving_hours: f64,
    pub hos_compliant: bool,
    pub hos_reasons: Vec<String>,
    pub cycle_remaining_hours_before: f64,
    pub cycle_remaining_hours_after: f64,
}

/// Sums driving time across all days and checks it against the cycle.
///
/// Only reports: a trip that overruns the cycle is still fully scheduled.
/// Non-finite `cycle_used_hours` counts as zero; events with
/// `end_minute <= start_minute` are skipped.
pub fn compute_summary(days: &[DayLog], cycle_used_hours: f64) -> HosSummary {
    let prior_hours = if cycle_used_hours.is_finite() {
        cycle_used_hours
    } else {
        0.0
    };

    let driving_minutes: u64 = days
        .iter()
        .flat_map(|day| &day.events)
        .filter(|event| event.status == DutyStatus::Driving)
        .filter(|event| event.end_minute > event.start_minute)
        .map(|event| u64::from(event.end_minute - event.start_minute))
        .sum();

    // Compare unrounded hours so rounding cannot flip the verdict.
    let driving_hours = driving_minutes as f64 / 60.0;
    let projected_hours = prior_hours + driving_hours;
    let hos_compliant = projected_hours <= CYCLE_LIMIT_HOURS;

    let mut hos_reasons = Vec::new();
    if !hos_compliant {
        hos_reasons.push(INSUFFICIENT_CYCLE_REASON.to_string());
    }

    HosSummary {
        driving_hours: round2(driving_hours),
        hos_compliant,
        hos_reasons,
        cycle_remaining_hours_before: round2(CYCLE_LIMIT_HOURS - prior_hours),
        cycle_remaining_hours_after: round2(CYCLE_LIMIT_HOURS - projected_hours),
    }
}
