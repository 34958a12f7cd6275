//! Visual classification of check records

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{CheckRecord, CheckStatus};

/// Latency above which a successful check is shown as slow
pub const SLOW_THRESHOLD_MS: f64 = 1000.0;

/// How a check record is drawn in the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualClass {
    Up,
    Slow,
    Down,
}

impl VisualClass {
    /// Style token used by the web front end
    pub fn css_class(&self) -> &'static str {
        match self {
            VisualClass::Up => "cube-up",
            VisualClass::Slow => "cube-slow",
            VisualClass::Down => "cube-down",
        }
    }

    /// Single-glyph rendering for text output
    pub fn glyph(&self) -> char {
        match self {
            VisualClass::Up => '▪',
            VisualClass::Slow => '▴',
            VisualClass::Down => '✕',
        }
    }
}

impl fmt::Display for VisualClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisualClass::Up => write!(f, "up"),
            VisualClass::Slow => write!(f, "slow"),
            VisualClass::Down => write!(f, "down"),
        }
    }
}

/// Classify a record. A down status always wins over latency.
pub fn classify(record: &CheckRecord) -> VisualClass {
    if record.status == CheckStatus::Down {
        return VisualClass::Down;
    }
    if record.latency_ms() > SLOW_THRESHOLD_MS {
        return VisualClass::Slow;
    }
    VisualClass::Up
}
