pub mod enums;
pub mod parse;
pub mod record;
pub mod timer;

pub use enums::{TimerMode, TimerStatus, UiMode};
pub use parse::{parse_days, parse_minutes};
pub use record::{format_hms, format_minutes, round2, SessionRecord, TIMESTAMP_FORMAT};
pub use timer::{CompletedSession, Moment, SessionTimer};
