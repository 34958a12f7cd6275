//! Check records and per-URL histories as delivered by the service

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Outcome of one check of a monitored URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Up,
    Down,
    #[default]
    Unknown,
}

impl CheckStatus {
    /// Map a wire status string; anything unrecognised is `Unknown`
    pub fn from_wire(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("up") {
            CheckStatus::Up
        } else if value.eq_ignore_ascii_case("down") {
            CheckStatus::Down
        } else {
            CheckStatus::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Up => "up",
            CheckStatus::Down => "down",
            CheckStatus::Unknown => "unknown",
        }
    }

    /// Capitalised name for result panels
    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Up => "Up",
            CheckStatus::Down => "Down",
            CheckStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation of a monitored URL
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CheckRecord {
    #[serde(default, deserialize_with = "status_or_unknown")]
    pub status: CheckStatus,
    #[serde(
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub latency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl CheckRecord {
    pub fn new(status: CheckStatus, latency: Option<&str>) -> Self {
        Self {
            status,
            latency: latency.map(str::to_string),
            ..Self::default()
        }
    }

    /// Latency in milliseconds, `0.0` when absent or unreadable
    pub fn latency_ms(&self) -> f64 {
        crate::latency::parse_latency(self.latency.as_deref())
    }
}

/// Check history of one monitored site, in delivery order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UrlHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_id: Option<i64>,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "logs", default, deserialize_with = "null_as_empty")]
    pub records: Vec<CheckRecord>,
}

impl UrlHistory {
    pub fn new(url: impl Into<String>, records: Vec<CheckRecord>) -> Self {
        Self {
            url_id: None,
            url: url.into(),
            records,
        }
    }
}

/// Decode a `/getlog` body; the backend sends `null` when nothing is monitored
pub fn decode_histories(body: &str) -> serde_json::Result<Vec<UrlHistory>> {
    let histories: Option<Vec<UrlHistory>> = serde_json::from_str(body)?;
    Ok(histories.unwrap_or_default())
}

fn status_or_unknown<'de, D>(deserializer: D) -> Result<CheckStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(CheckStatus::from_wire)
        .unwrap_or_default())
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}
