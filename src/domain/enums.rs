use serde::{Deserialize, Serialize};

/// Timing mode of a study session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Open-ended: runs until the user stops it
    #[default]
    CountUp,
    /// Fixed target: runs until expiry or an early stop
    CountDown,
}

impl TimerMode {
    /// Parse mode from the log's mode column ("countup" / "countdown")
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "countup" => Some(Self::CountUp),
            "countdown" => Some(Self::CountDown),
            _ => None,
        }
    }

    /// Convert mode to the log's mode column
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::CountUp => "countup",
            Self::CountDown => "countdown",
        }
    }

    /// Human-readable label for the shells
    pub fn label(&self) -> &'static str {
        match self {
            Self::CountUp => "Count-up",
            Self::CountDown => "Count-down",
        }
    }
}

/// Runtime status of the session timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    /// Count-down reached zero; waits to be finished into a record
    Finished,
}

impl TimerStatus {
    /// A session is in progress once it has been started and not yet finished
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

/// UI mode for the terminal window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Modal,
    EditingInput,
    ChartPrompt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_mode_from_tag() {
        assert_eq!(TimerMode::from_tag("countup"), Some(TimerMode::CountUp));
        assert_eq!(TimerMode::from_tag("countdown"), Some(TimerMode::CountDown));
        assert_eq!(TimerMode::from_tag(" CountDown "), Some(TimerMode::CountDown));
        assert_eq!(TimerMode::from_tag("pomodoro"), None);
    }

    #[test]
    fn test_timer_mode_to_tag() {
        assert_eq!(TimerMode::CountUp.to_tag(), "countup");
        assert_eq!(TimerMode::CountDown.to_tag(), "countdown");
    }

    #[test]
    fn test_timer_status_in_progress() {
        assert!(!TimerStatus::Idle.is_in_progress());
        assert!(TimerStatus::Running.is_in_progress());
        assert!(TimerStatus::Paused.is_in_progress());
        assert!(!TimerStatus::Finished.is_in_progress());
    }
}
