// Copyright (c) 2025 - Cowboy AI, Inc.
//! Maintenance Window Value Objects
//!
//! A maintenance window silences checks during a time range. Recurring
//! windows (`day`, `week`, `month`) are expanded by the remote service into
//! occurrences until `effective_to`.

use chrono::{DateTime, Months};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound on occurrences produced by [`MaintenanceWindow::occurrence_windows`]
pub const MAX_OCCURRENCES: usize = 1000;

const DAY_SECS: i64 = 24 * 60 * 60;

/// Unknown recurrence type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown recurrence type: {0}")]
pub struct RecurrenceTypeError(pub String);

/// How a maintenance window repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    #[default]
    None,
    Day,
    Week,
    Month,
}

impl RecurrenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceType::None => "none",
            RecurrenceType::Day => "day",
            RecurrenceType::Week => "week",
            RecurrenceType::Month => "month",
        }
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceType {
    type Err = RecurrenceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(RecurrenceType::None),
            "day" => Ok(RecurrenceType::Day),
            "week" => Ok(RecurrenceType::Week),
            "month" => Ok(RecurrenceType::Month),
            other => Err(RecurrenceTypeError(other.to_string())),
        }
    }
}

/// Maintenance window as sent to the API on create and update
///
/// Check ids travel as comma-separated lists (`"1,2,3"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MaintenanceWindow {
    pub description: String,
    /// Start of the first occurrence, unix seconds
    pub from: i64,
    /// End of the first occurrence, unix seconds
    pub to: i64,
    #[serde(rename = "effectiveto", skip_serializing_if = "Option::is_none")]
    pub effective_to: Option<i64>,
    #[serde(rename = "recurrencetype")]
    pub recurrence_type: RecurrenceType,
    #[serde(rename = "repeatevery", skip_serializing_if = "Option::is_none")]
    pub repeat_every: Option<u32>,
    #[serde(
        rename = "tmsids",
        serialize_with = "join_ids",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tms_ids: Vec<i64>,
    #[serde(
        rename = "uptimeids",
        serialize_with = "join_ids",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub uptime_ids: Vec<i64>,
}

fn join_ids<S: Serializer>(ids: &[i64], serializer: S) -> Result<S::Ok, S::Error> {
    let joined = ids
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&joined)
}

impl MaintenanceWindow {
    /// Start of the occurrence `periods` recurrence periods after the first
    fn nth_start(&self, periods: i64) -> Option<i64> {
        match self.recurrence_type {
            RecurrenceType::None => (periods == 0).then_some(self.from),
            RecurrenceType::Day => Some(self.from + periods * DAY_SECS),
            RecurrenceType::Week => Some(self.from + periods * 7 * DAY_SECS),
            RecurrenceType::Month => {
                let months = u32::try_from(periods).ok()?;
                DateTime::from_timestamp(self.from, 0)?
                    .checked_add_months(Months::new(months))
                    .map(|start| start.timestamp())
            }
        }
    }

    /// Windows of every occurrence this definition produces
    ///
    /// Non-recurring windows produce exactly one occurrence. Recurring windows
    /// repeat every `repeat_every` periods (default 1) for as long as the
    /// occurrence ends at or before `effective_to`; without `effective_to`
    /// only the first occurrence is produced. The result is capped at
    /// [`MAX_OCCURRENCES`].
    pub fn occurrence_windows(&self) -> Vec<(i64, i64)> {
        let first = (self.from, self.to);
        let effective_to = match (self.recurrence_type, self.effective_to) {
            (RecurrenceType::None, _) | (_, None) => return vec![first],
            (_, Some(effective_to)) => effective_to,
        };

        let every = i64::from(self.repeat_every.unwrap_or(1).max(1));
        let duration = self.to - self.from;
        let mut windows = Vec::new();

        for n in 0..MAX_OCCURRENCES as i64 {
            let Some(start) = self.nth_start(n * every) else {
                break;
            };
            let end = start + duration;
            if end > effective_to {
                break;
            }
            windows.push((start, end));
        }

        if windows.is_empty() {
            windows.push(first);
        }
        windows
    }
}

/// Checks attached to a maintenance window, as reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaintenanceChecks {
    #[serde(default)]
    pub uptime: Vec<i64>,
    #[serde(default)]
    pub tms: Vec<i64>,
}

/// Maintenance window as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaintenanceResponse {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    pub from: i64,
    pub to: i64,
    #[serde(rename = "effectiveto", default)]
    pub effective_to: i64,
    #[serde(rename = "recurrencetype", default)]
    pub recurrence_type: RecurrenceType,
    #[serde(rename = "repeatevery", default)]
    pub repeat_every: u32,
    #[serde(default)]
    pub checks: MaintenanceChecks,
}

impl MaintenanceResponse {
    /// Build the response the API reports for a stored window
    pub fn from_window(id: i64, window: &MaintenanceWindow) -> Self {
        Self {
            id,
            description: window.description.clone(),
            from: window.from,
            to: window.to,
            effective_to: window.effective_to.unwrap_or(window.to),
            recurrence_type: window.recurrence_type,
            repeat_every: window.repeat_every.unwrap_or(0),
            checks: MaintenanceChecks {
                uptime: window.uptime_ids.clone(),
                tms: window.tms_ids.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(from: i64, to: i64, effective_to: Option<i64>) -> MaintenanceWindow {
        MaintenanceWindow {
            description: "nightly".to_string(),
            from,
            to,
            effective_to,
            recurrence_type: RecurrenceType::Day,
            repeat_every: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_recurrence_type_parsing() {
        assert_eq!("week".parse::<RecurrenceType>().unwrap(), RecurrenceType::Week);
        assert_eq!(RecurrenceType::Month.to_string(), "month");
        assert!("hourly".parse::<RecurrenceType>().is_err());
    }

    #[test]
    fn test_single_window_without_recurrence() {
        let window = MaintenanceWindow {
            from: 100,
            to: 200,
            effective_to: Some(10_000_000),
            ..Default::default()
        };
        assert_eq!(window.occurrence_windows(), vec![(100, 200)]);
    }

    #[test]
    fn test_daily_windows_until_effective_to() {
        let from = 1_700_000_000;
        let to = from + 3600;
        let window = daily(from, to, Some(to + 3 * DAY_SECS));

        let windows = window.occurrence_windows();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows[0], (from, to));
        assert_eq!(windows[3], (from + 3 * DAY_SECS, to + 3 * DAY_SECS));
    }

    #[test]
    fn test_repeat_every_skips_periods() {
        let window = MaintenanceWindow {
            repeat_every: Some(2),
            ..daily(0, 60, Some(4 * DAY_SECS + 60))
        };
        assert_eq!(
            window.occurrence_windows(),
            vec![(0, 60), (2 * DAY_SECS, 2 * DAY_SECS + 60), (4 * DAY_SECS, 4 * DAY_SECS + 60)]
        );
    }

    #[test]
    fn test_monthly_windows_follow_calendar() {
        // 2026-01-31T00:00:00Z
        let from = 1_769_817_600;
        let window = MaintenanceWindow {
            recurrence_type: RecurrenceType::Month,
            ..daily(from, from + 60, Some(from + 62 * DAY_SECS))
        };
        let windows = window.occurrence_windows();
        assert_eq!(windows.len(), 3);
        // Clamped to the last day of February
        assert_eq!(windows[1].0, from + 28 * DAY_SECS);
    }

    #[test]
    fn test_request_serialization_joins_check_ids() {
        let window = MaintenanceWindow {
            tms_ids: vec![1, 2],
            ..daily(0, 60, None)
        };
        let json = serde_json::to_value(&window).unwrap();
        assert_eq!(json["tmsids"], "1,2");
        assert_eq!(json["recurrencetype"], "day");
        assert!(json.get("uptimeids").is_none());
        assert!(json.get("effectiveto").is_none());
    }
}
