//! Hours-of-Service day log simulation.
//!
//! Walks the stop list once, greedily filling 24-hour days with driving,
//! on-duty and off-duty time. Each day is capped at 11 hours of driving and
//! a 14-hour shift (driving plus on-duty); hitting either cap or midnight
//! seals the day, pads it with off-duty time and opens the next one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::route::Route;
use crate::stop_planner::{COMBINED_BREAK_MINUTES, Stop, StopType};

pub const MINUTES_PER_DAY: u32 = 24 * 60;
pub const MAX_DRIVING_MINUTES_PER_DAY: u32 = 11 * 60;
pub const MAX_SHIFT_MINUTES_PER_DAY: u32 = 14 * 60;
pub const DRIVING_MPH: f64 = 50.0;

const INSPECTION_MINUTES: u32 = 60;
const BREAK_MINUTES: u32 = 30;
const FUEL_MINUTES: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    Driving,
    OnDuty,
    OffDuty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub status: DutyStatus,
    pub start_minute: u32,
    pub end_minute: u32,
}

impl Event {
    pub fn minutes(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }
}

/// Annotation for the moment a stop is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remark {
    pub minute: u32,
    pub start_minute: u32,
    pub end_minute: u32,
    pub abbr: String,
    pub stop_type: StopType,
    pub reason: String,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
    /// Carried over from the source stop.
    #[serde(skip)]
    pub eld_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    pub day: u32,
    pub events: Vec<Event>,
    pub remarks: Vec<Remark>,
}

impl DayLog {
    pub fn minutes_with(&self, status: DutyStatus) -> u32 {
        self.events
            .iter()
            .filter(|event| event.status == status)
            .map(Event::minutes)
            .sum()
    }
}

/// The parts of a stop a remark needs. Trailing endpoints synthesized by
/// the scheduler have no coordinates.
#[derive(Debug, Clone, Copy)]
struct StopView<'a> {
    stop_type: StopType,
    mile: Option<f64>,
    coord: Option<(f64, f64)>,
    label: Option<&'a str>,
    reason: Option<&'a str>,
    duration_minutes: Option<u32>,
    combined_break: bool,
    eld_required: bool,
}

impl<'a> StopView<'a> {
    fn synthetic(stop_type: StopType, mile: f64) -> Self {
        Self {
            stop_type,
            mile: Some(mile),
            coord: None,
            label: None,
            reason: None,
            duration_minutes: None,
            combined_break: false,
            eld_required: false,
        }
    }

    fn duration_minutes(&self) -> u32 {
        if let Some(minutes) = self.duration_minutes {
            return minutes;
        }
        match self.stop_type {
            StopType::Fuel if self.combined_break => COMBINED_BREAK_MINUTES,
            StopType::Pickup | StopType::Dropoff => 60,
            StopType::Break => 30,
            StopType::Fuel => 15,
        }
    }

    fn reason(&self) -> String {
        if let Some(reason) = self.reason.filter(|reason| !reason.is_empty()) {
            return reason.to_string();
        }
        match self.stop_type {
            StopType::Pickup => "Pre-trip",
            StopType::Break => "30-min break",
            StopType::Fuel => "Fuel",
            StopType::Dropoff => "Post-trip",
        }
        .to_string()
    }

    fn abbr(&self) -> String {
        match self.stop_type {
            StopType::Break | StopType::Fuel => match self.mile {
                Some(mile) => format!("MI{}", mile.round() as i64),
                None => "LOC".to_string(),
            },
            StopType::Pickup | StopType::Dropoff => abbr_from_label(self.label),
        }
    }
}

impl<'a> From<&'a Stop> for StopView<'a> {
    fn from(stop: &'a Stop) -> Self {
        Self {
            stop_type: stop.stop_type,
            mile: Some(stop.mile),
            coord: Some(stop.coord()),
            label: stop.label.as_deref(),
            reason: stop.reason.as_deref(),
            duration_minutes: stop.duration_minutes,
            combined_break: stop.combined_break,
            eld_required: stop.eld_required,
        }
    }
}

/// First three letters of the first word containing letters, uppercased.
fn abbr_from_label(label: Option<&str>) -> String {
    label
        .into_iter()
        .flat_map(str::split_whitespace)
        .map(|word| word.chars().filter(|ch| ch.is_alphabetic()).collect::<String>())
        .find(|letters| !letters.is_empty())
        .map(|letters| letters.chars().take(3).collect::<String>().to_uppercase())
        .unwrap_or_else(|| "LOC".to_string())
}

/// Driving time for a distance at [`DRIVING_MPH`], to the nearest minute.
pub fn miles_to_minutes(miles: f64) -> u32 {
    if !miles.is_finite() || miles <= 0.0 {
        return 0;
    }
    let hours = miles / DRIVING_MPH;
    (hours * 60.0).round() as u32
}

/// State of one scheduling run. Build one per trip.
#[derive(Debug)]
pub struct HosScheduler {
    days: Vec<DayLog>,
    day_number: u32,
    minute: u32,
    driving_today: u32,
    shift_today: u32,
    events: Vec<Event>,
    remarks: Vec<Remark>,
}

impl Default for HosScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl HosScheduler {
    pub fn new() -> Self {
        Self {
            days: Vec::new(),
            day_number: 1,
            minute: 0,
            driving_today: 0,
            shift_today: 0,
            events: Vec::new(),
            remarks: Vec::new(),
        }
    }

    /// Appends an event, clipped at midnight, merging into the previous
    /// event when it has the same status and ends where this one starts.
    fn push_event(&mut self, status: DutyStatus, duration: u32) {
        let start = self.minute;
        let end = start.saturating_add(duration).min(MINUTES_PER_DAY);
        let actual = end.saturating_sub(start);
        if actual == 0 {
            return;
        }

        match self.events.last_mut() {
            Some(last) if last.status == status && last.end_minute == start => {
                last.end_minute = end;
            }
            _ => self.events.push(Event {
                status,
                start_minute: start,
                end_minute: end,
            }),
        }

        match status {
            DutyStatus::Driving => {
                self.driving_today += actual;
                self.shift_today += actual;
            }
            DutyStatus::OnDuty => self.shift_today += actual,
            DutyStatus::OffDuty => {}
        }

        self.minute = end;
    }

    /// Pads the day with off-duty time, seals it and opens the next day.
    pub fn close_day(&mut self) {
        if self.minute < MINUTES_PER_DAY {
            self.push_event(DutyStatus::OffDuty, MINUTES_PER_DAY - self.minute);
        }

        self.days.push(DayLog {
            day: self.day_number,
            events: std::mem::take(&mut self.events),
            remarks: std::mem::take(&mut self.remarks),
        });

        self.day_number += 1;
        self.minute = 0;
        self.driving_today = 0;
        self.shift_today = 0;
    }

    fn ensure_current_day(&mut self) {
        if self.minute >= MINUTES_PER_DAY {
            self.close_day();
        }
    }

    /// Minutes the per-day caps still allow for `status`.
    fn cap_headroom(&self, status: DutyStatus) -> u32 {
        let shift_left = MAX_SHIFT_MINUTES_PER_DAY.saturating_sub(self.shift_today);
        match status {
            DutyStatus::Driving => {
                MAX_DRIVING_MINUTES_PER_DAY
                    .saturating_sub(self.driving_today)
                    .min(shift_left)
            }
            DutyStatus::OnDuty => shift_left,
            DutyStatus::OffDuty => u32::MAX,
        }
    }

    /// Schedules `minutes` of `status`, spilling into as many days as the
    /// caps require. Every iteration either consumes minutes or closes a
    /// day, and a fresh day always has headroom, so the loop terminates.
    pub fn schedule(&mut self, status: DutyStatus, minutes: u32) {
        let mut remaining = minutes;
        while remaining > 0 {
            if self.minute >= MINUTES_PER_DAY {
                self.close_day();
                continue;
            }

            let day_left = MINUTES_PER_DAY - self.minute;
            let allowed = remaining.min(day_left).min(self.cap_headroom(status));
            if allowed == 0 {
                self.close_day();
                continue;
            }

            self.push_event(status, allowed);
            remaining -= allowed;

            if remaining > 0
                && (self.cap_headroom(status) == 0 || self.minute >= MINUTES_PER_DAY)
            {
                self.close_day();
            }
        }
    }

    pub fn schedule_driving(&mut self, minutes: u32) {
        self.schedule(DutyStatus::Driving, minutes);
    }

    pub fn schedule_on_duty(&mut self, minutes: u32) {
        self.schedule(DutyStatus::OnDuty, minutes);
    }

    pub fn schedule_off_duty(&mut self, minutes: u32) {
        self.schedule(DutyStatus::OffDuty, minutes);
    }

    /// Records arrival at a stop at the current minute.
    fn add_remark(&mut self, stop: StopView<'_>) {
        self.ensure_current_day();

        let start = self.minute;
        let end = start
            .saturating_add(stop.duration_minutes())
            .min(MINUTES_PER_DAY);

        self.remarks.push(Remark {
            minute: start,
            start_minute: start,
            end_minute: end,
            abbr: stop.abbr(),
            stop_type: stop.stop_type,
            reason: stop.reason(),
            lng: stop.coord.map(|coord| coord.0),
            lat: stop.coord.map(|coord| coord.1),
            eld_required: stop.eld_required,
        });
    }

    /// Seals the in-progress day, even if partially filled, and returns
    /// every day log.
    pub fn finish(mut self) -> Vec<DayLog> {
        self.close_day();
        self.days
    }
}

/// On-duty minutes spent at a fuel stop.
fn fuel_service_minutes(stop: &Stop) -> u32 {
    match stop.duration_minutes {
        Some(minutes) => minutes,
        None if stop.combined_break => COMBINED_BREAK_MINUTES,
        None => FUEL_MINUTES,
    }
}

/// Simulates the trip and returns one log per calendar day.
///
/// Pre-trip inspection, driving between consecutive stops with the stop's
/// service time on arrival, then post-trip inspection.
pub fn generate_logs(route: &Route, stops: &[Stop]) -> Vec<DayLog> {
    let mut scheduler = HosScheduler::new();

    match stops.first() {
        Some(first) => scheduler.add_remark(first.into()),
        None => scheduler.add_remark(StopView::synthetic(StopType::Pickup, 0.0)),
    }
    scheduler.schedule_on_duty(INSPECTION_MINUTES);

    if stops.len() >= 2 {
        for pair in stops.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            let miles = (next.mile - current.mile).max(0.0);
            scheduler.schedule_driving(miles_to_minutes(miles));

            match next.stop_type {
                StopType::Break => {
                    scheduler.add_remark(next.into());
                    scheduler.schedule_off_duty(BREAK_MINUTES);
                }
                StopType::Fuel => {
                    scheduler.add_remark(next.into());
                    scheduler.schedule_on_duty(fuel_service_minutes(next));
                }
                StopType::Dropoff => scheduler.add_remark(next.into()),
                StopType::Pickup => {}
            }
        }
    } else {
        scheduler.schedule_driving(miles_to_minutes(route.planning_miles()));
    }

    if stops.last().is_none_or(|last| last.stop_type != StopType::Dropoff) {
        scheduler.add_remark(StopView::synthetic(StopType::Dropoff, route.planning_miles()));
    }

    scheduler.schedule_on_duty(INSPECTION_MINUTES);

    let days = scheduler.finish();
    debug!(days = days.len(), stops = stops.len(), "generated HOS day logs");
    days
}
