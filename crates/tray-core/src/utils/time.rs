use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, TrayError};

/// Source of the current wall-clock time.
pub trait Clock {
    /// Seconds since the Unix epoch, with sub-second precision.
    fn now_secs(&self) -> f64;
}

/// Clock backed by [`SystemTime`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default()
    }
}

/// Clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_secs(&self) -> f64 {
        self.0
    }
}

/// Zone used for timestamps that carry no UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NaiveZone {
    #[default]
    Local,
    Utc,
}

impl std::str::FromStr for NaiveZone {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(NaiveZone::Local),
            "utc" => Ok(NaiveZone::Utc),
            other => Err(format!("unknown zone '{other}', expected 'local' or 'utc'")),
        }
    }
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 timestamp into integer milliseconds since the epoch.
///
/// Offsets are honoured when present; naive values are placed in `zone`.
/// A bare date means midnight. Milliseconds are truncated toward zero.
pub fn iso_to_millis(value: &str, zone: NaiveZone) -> Result<i64> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(truncated_millis(&dt));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Ok(truncated_millis(&dt));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| parse_hour_only(trimmed))
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| TrayError::Timestamp {
            value: value.to_string(),
            reason: "not an ISO-8601 date or datetime".to_string(),
        })?;

    match zone {
        NaiveZone::Utc => Ok(truncated_millis(&Utc.from_utc_datetime(&naive))),
        NaiveZone::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| truncated_millis(&dt))
            .ok_or_else(|| TrayError::Timestamp {
                value: value.to_string(),
                reason: "does not exist in the local time zone".to_string(),
            }),
    }
}

/// `YYYY-MM-DDTHH`; chrono's format parser insists on minutes.
fn parse_hour_only(value: &str) -> Option<NaiveDateTime> {
    let (date, hour) = value.split_once(['T', ' '])?;
    if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(hour.parse().ok()?, 0, 0)
}

// `timestamp_millis` floors; integer division truncates toward zero.
fn truncated_millis<Tz: TimeZone>(dt: &DateTime<Tz>) -> i64 {
    dt.timestamp_micros() / 1000
}
