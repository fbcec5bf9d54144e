//! Trip endpoints as received from clients.
//!
//! Clients send either a free-text label or a `{label, lng, lat}` object.
//! Normalization never fails: anything unparsable becomes an unknown
//! coordinate and downstream stages skip it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub label: String,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
}

impl Location {
    pub fn new(label: impl Into<String>, lng: f64, lat: f64) -> Self {
        Self {
            label: label.into(),
            lng: Some(lng),
            lat: Some(lat),
        }
    }

    /// A location known only by its label.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            lng: None,
            lat: None,
        }
    }

    /// Normalizes a raw JSON value into a location.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(label) => Self::labelled(label.trim()),
            Value::Object(fields) => Self {
                label: fields.get("label").map(label_text).unwrap_or_default(),
                lng: fields.get("lng").and_then(number),
                lat: fields.get("lat").and_then(number),
            },
            _ => Self::default(),
        }
    }

    /// `(lng, lat)` when both coordinates are known.
    pub fn coord(&self) -> Option<(f64, f64)> {
        Some((self.lng?, self.lat?))
    }

    pub fn label(&self) -> Option<&str> {
        Some(self.label.as_str()).filter(|label| !label.is_empty())
    }
}

/// Reads a finite number from a JSON number or numeric string.
pub fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|value| value.is_finite())
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
