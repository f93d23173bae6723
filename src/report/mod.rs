pub mod generator;
pub mod stats;

pub use generator::{recent_json, recent_summary, text_chart, today_summary};
pub use stats::{daily_totals, recent_totals, today_total, total_for_day, DailyTotal, DayTotal};
