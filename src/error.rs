use thiserror::Error;

/// Rejected timer transitions. None of these change timer state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("the timer is already running")]
    AlreadyRunning,

    #[error("the timer is not running")]
    NotRunning,

    #[error("the timer is not paused")]
    NotPaused,

    #[error("finish or save the current session first")]
    SessionInProgress,

    #[error("the last session has not been saved yet")]
    UnsavedSession,

    #[error("nothing to save: no time has been recorded")]
    NothingToSave,

    #[error("a count-down needs a target of at least one second")]
    InvalidTarget,
}

/// Malformed user input from either shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("'{0}' is not a valid number")]
    NotANumber(String),

    #[error("minutes must be greater than 0 (got {0})")]
    NotPositive(String),

    #[error("a count-down must last at least one second")]
    TooShort,

    #[error("days must be between 1 and {max} (got {value})")]
    DaysOutOfRange { value: String, max: u32 },
}
