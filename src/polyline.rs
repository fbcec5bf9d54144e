//! Polyline representation for route geometries.
//!
//! Points are stored as decoded `(lng, lat)` pairs, the order routing
//! backends and map front-ends exchange them in. Encoded polylines are
//! decoded at the boundary (when receiving from a routing backend).

use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::haversine::haversine_miles;

/// A route geometry as decoded `(lng, lat)` coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded `(lng, lat)` points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string at precision 5.
    ///
    /// The encoding stores latitude before longitude; the result is
    /// flipped to `(lng, lat)`.
    pub fn decode(encoded: &str) -> Result<Self, RouteError> {
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut points = Vec::new();

        while index < bytes.len() {
            lat += decode_value(bytes, &mut index)?;
            lng += decode_value(bytes, &mut index)?;
            points.push((lng as f64 / 1e5, lat as f64 / 1e5));
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn first(&self) -> Option<(f64, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// Total great-circle length in miles.
    pub fn length_miles(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_miles(pair[0], pair[1]))
            .sum()
    }

    /// Locates the point `target_miles` along the path.
    ///
    /// Distance is accumulated segment by segment with haversine, then the
    /// point is interpolated linearly in lng/lat inside the matching
    /// segment. The planar step drifts from the true great-circle position
    /// as segments get longer. Targets past the end clamp to the last point.
    pub fn point_at_mile(&self, target_miles: f64) -> Option<(f64, f64)> {
        let first = self.first()?;
        if target_miles <= 0.0 {
            return Some(first);
        }

        let mut accumulated = 0.0;
        for pair in self.points.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let segment_miles = haversine_miles(start, end);
            let next_accumulated = accumulated + segment_miles;

            if target_miles <= next_accumulated && segment_miles > 0.0 {
                let ratio = (target_miles - accumulated) / segment_miles;
                return Some(interpolate(start, end, ratio));
            }

            accumulated = next_accumulated;
        }

        self.last()
    }
}

impl From<Vec<(f64, f64)>> for Polyline {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points)
    }
}

fn interpolate(start: (f64, f64), end: (f64, f64), ratio: f64) -> (f64, f64) {
    (
        start.0 + (end.0 - start.0) * ratio,
        start.1 + (end.1 - start.1) * ratio,
    )
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, RouteError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or_else(|| RouteError::InvalidGeometry("truncated polyline".to_string()))?;
        *index += 1;

        let chunk = i64::from(byte)
            .checked_sub(63)
            .filter(|value| *value >= 0)
            .ok_or_else(|| RouteError::InvalidGeometry(format!("invalid polyline byte {}", byte)))?;
        if shift > 60 {
            return Err(RouteError::InvalidGeometry("polyline value overflow".to_string()));
        }

        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
