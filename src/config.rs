use crate::persistence::DEFAULT_LOG_FILE;
use crate::ticker::{TEXT_TICK_MS, WINDOW_TICK_MS};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

/// Length of the one-key pomodoro preset
pub const POMODORO_MINUTES: u64 = 25;

/// Trend window used when the user doesn't pick one
pub const DEFAULT_RECENT_DAYS: u32 = 7;

/// Largest trend window either shell accepts
pub const MAX_RECENT_DAYS: u32 = 365;

/// Runtime configuration, built once in `main` and passed down explicitly
#[derive(Debug, Clone)]
pub struct Config {
    /// Session log location (relative paths resolve against the working directory)
    pub log_file: PathBuf,
    pub pomodoro: Duration,
    pub default_recent_days: u32,
    pub max_recent_days: u32,
    /// Display refresh of the text menu
    pub text_tick: Duration,
    /// Display refresh and expiry check of the terminal window
    pub window_tick: Duration,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            pomodoro: Duration::from_secs(POMODORO_MINUTES * 60),
            default_recent_days: DEFAULT_RECENT_DAYS,
            max_recent_days: MAX_RECENT_DAYS,
            text_tick: Duration::from_millis(TEXT_TICK_MS),
            window_tick: Duration::from_millis(WINDOW_TICK_MS),
            log_level: LevelFilter::INFO,
        }
    }
}

impl Config {
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// Where diagnostic logs go (never the terminal, both shells own it)
    pub fn diagnostics_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("studylog").join("logs"))
    }
}
