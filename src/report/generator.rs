use crate::domain::format_minutes;
use crate::report::stats::{DailyTotal, DayTotal};
use anyhow::Result;

/// Widest bar drawn by the text chart
const CHART_WIDTH: usize = 40;

/// Summary of today's study time
pub fn today_summary(total: &DayTotal) -> String {
    if total.sessions == 0 {
        return "No study sessions recorded today yet.".to_string();
    }
    format!(
        "Sessions today: {}\nTotal study time: {:.2} min ({})",
        total.sessions,
        total.minutes,
        format_minutes(total.minutes)
    )
}

/// One line per day, oldest first
pub fn recent_summary(totals: &[DailyTotal]) -> String {
    let mut report = format!("Study time over the last {} days:\n", totals.len());
    for day in totals {
        report.push_str(&format!("{}  {:>8.2} min\n", day.date.format("%Y-%m-%d"), day.minutes));
    }

    let sum: f64 = totals.iter().map(|d| d.minutes).sum();
    let avg = if totals.is_empty() { 0.0 } else { sum / totals.len() as f64 };
    report.push_str(&format!("Total: {:.2} min   Daily average: {:.2} min", sum, avg));
    report
}

/// Horizontal bar chart for terminals: one bar per day, scaled to the
/// busiest day of the window
pub fn text_chart(totals: &[DailyTotal]) -> String {
    let max = totals.iter().map(|d| d.minutes).fold(0.0_f64, f64::max);
    let mut chart = String::new();

    for day in totals {
        let width = if max > 0.0 {
            ((day.minutes / max) * CHART_WIDTH as f64).round() as usize
        } else {
            0
        };
        chart.push_str(&format!(
            "{} |{:<w$}| {:.2}\n",
            day.date.format("%m-%d"),
            "#".repeat(width),
            day.minutes,
            w = CHART_WIDTH
        ));
    }
    chart
}

/// Trend window as pretty-printed JSON
pub fn recent_json(totals: &[DailyTotal]) -> Result<String> {
    Ok(serde_json::to_string_pretty(totals)?)
}
