//! Latency string normalization
//!
//! The monitoring backend reports latency as a human-readable duration such
//! as `"120ms"`, `"1.5s"` or `"800µs"`. Everything downstream works in
//! milliseconds, and a value that cannot be read is simply zero.

use std::sync::LazyLock;

use regex::Regex;

static LATENCY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d*)?|\.\d+)(ms|µs|s)$").ok());

/// Unit token recognised after the magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyUnit {
    Seconds,
    Milliseconds,
    Microseconds,
}

impl LatencyUnit {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "s" => Some(LatencyUnit::Seconds),
            "ms" => Some(LatencyUnit::Milliseconds),
            "µs" => Some(LatencyUnit::Microseconds),
            _ => None,
        }
    }

    fn to_millis(self, magnitude: f64) -> f64 {
        match self {
            LatencyUnit::Seconds => magnitude * 1000.0,
            LatencyUnit::Milliseconds => magnitude,
            LatencyUnit::Microseconds => magnitude / 1000.0,
        }
    }
}

/// Parse a latency string into milliseconds.
///
/// Absent, malformed and unrecognised values all yield `0.0`; this never fails.
pub fn parse_latency(latency: Option<&str>) -> f64 {
    latency.map_or(0.0, parse_latency_str)
}

/// Parse a present latency string into milliseconds, `0.0` if unreadable.
pub fn parse_latency_str(latency: &str) -> f64 {
    let Some(pattern) = LATENCY_PATTERN.as_ref() else {
        return 0.0;
    };
    let Some(captures) = pattern.captures(latency.trim()) else {
        return 0.0;
    };

    let magnitude = captures
        .get(1)
        .and_then(|m| m.as_str().parse::<f64>().ok());
    let unit = captures
        .get(2)
        .and_then(|m| LatencyUnit::from_token(m.as_str()));

    match (magnitude, unit) {
        (Some(magnitude), Some(unit)) if magnitude.is_finite() => unit.to_millis(magnitude),
        _ => 0.0,
    }
}
