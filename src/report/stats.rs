use crate::domain::{round2, SessionRecord};
use crate::persistence::LogStore;
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// Study total for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DayTotal {
    pub minutes: f64,
    pub sessions: usize,
}

/// One entry of a trailing N-day window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub minutes: f64,
}

/// Sum the minutes of every record that started on `date`
pub fn total_for_day<I>(records: I, date: NaiveDate) -> DayTotal
where
    I: IntoIterator<Item = SessionRecord>,
{
    let mut total = DayTotal::default();

    for record in records.into_iter().filter(|r| r.date() == date) {
        total.minutes += record.duration_minutes;
        total.sessions += 1;
    }

    total.minutes = round2(total.minutes);
    total
}

/// Per-day totals for the `days` calendar days ending at `reference`
/// (inclusive), oldest first. Always exactly `days` entries.
pub fn daily_totals<I>(records: I, days: u32, reference: NaiveDate) -> Vec<DailyTotal>
where
    I: IntoIterator<Item = SessionRecord>,
{
    let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for record in records {
        *by_day.entry(record.date()).or_insert(0.0) += record.duration_minutes;
    }

    (0..i64::from(days))
        .rev()
        .map(|offset| {
            let date = reference - Duration::days(offset);
            DailyTotal {
                date,
                minutes: round2(by_day.get(&date).copied().unwrap_or(0.0)),
            }
        })
        .collect()
}

/// `total_for_day` over a full scan of the store
pub fn today_total(store: &LogStore, date: NaiveDate) -> Result<DayTotal> {
    Ok(total_for_day(store.scan()?, date))
}

/// `daily_totals` over a full scan of the store
pub fn recent_totals(store: &LogStore, days: u32, reference: NaiveDate) -> Result<Vec<DailyTotal>> {
    Ok(daily_totals(store.scan()?, days, reference))
}
