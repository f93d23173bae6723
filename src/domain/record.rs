use super::enums::TimerMode;
use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use std::time::Duration;

/// Timestamp layout used in the session log (local wall-clock)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimum number of fields a log row needs: start, end, duration
const REQUIRED_FIELDS: usize = 3;

/// One persisted study session (a row in the log)
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Pause-adjusted minutes, rounded to two decimals
    pub duration_minutes: f64,
    pub mode: TimerMode,
    pub note: String,
}

impl SessionRecord {
    /// Build a record from raw elapsed time. Timestamps are truncated to whole
    /// seconds so the in-memory record matches what the log stores.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        elapsed: Duration,
        mode: TimerMode,
        note: impl Into<String>,
    ) -> Self {
        let start = start.trunc_subsecs(0);
        let end = end.trunc_subsecs(0).max(start);
        Self {
            start,
            end,
            duration_minutes: minutes_from_secs(elapsed.as_secs_f64()),
            mode,
            note: note.into(),
        }
    }

    /// Calendar day the session is bucketed under (its start date)
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Serialize to the five log columns
    pub fn to_row(&self) -> [String; 5] {
        [
            self.start.format(TIMESTAMP_FORMAT).to_string(),
            self.end.format(TIMESTAMP_FORMAT).to_string(),
            format!("{:.2}", self.duration_minutes),
            self.mode.to_tag().to_string(),
            self.note.clone(),
        ]
    }

    /// Parse a log row. Returns `None` for rows that can't be trusted:
    /// too few fields, an unreadable start, or a bad/negative duration.
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        if fields.len() < REQUIRED_FIELDS {
            return None;
        }

        let start = parse_timestamp(fields[0])?;
        let end = parse_timestamp(fields[1]).unwrap_or(start);

        let duration_minutes: f64 = fields[2].trim().parse().ok()?;
        if !duration_minutes.is_finite() || duration_minutes < 0.0 {
            return None;
        }

        let mode = fields
            .get(3)
            .and_then(|tag| TimerMode::from_tag(tag))
            .unwrap_or_default();
        let note = fields.get(4).map(|n| n.to_string()).unwrap_or_default();

        Some(Self {
            start,
            end,
            duration_minutes,
            mode,
            note,
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert raw seconds to persisted minutes (two decimals)
pub fn minutes_from_secs(secs: f64) -> f64 {
    round2(secs / 60.0)
}

/// Format a duration as "HH:MM:SS", flooring sub-second remainders
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format fractional minutes as "Xh Ym Zs" (omits leading zero units)
pub fn format_minutes(minutes: f64) -> String {
    let total_secs = (minutes * 60.0).round().max(0.0) as u64;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}
