use super::enums::{TimerMode, TimerStatus};
use super::record::SessionRecord;
use crate::error::TimerError;
use chrono::{Local, NaiveDateTime};
use std::time::{Duration, Instant};

/// A point in time seen through both clocks: the monotonic instant drives
/// elapsed-time accounting, the wall-clock time ends up in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub instant: Instant,
    pub wall: NaiveDateTime,
}

impl Moment {
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
            wall: Local::now().naive_local(),
        }
    }

    /// The same moment shifted forward on both clocks
    pub fn after(&self, delta: Duration) -> Self {
        Self {
            instant: self.instant + delta,
            wall: self.wall
                + chrono::Duration::from_std(delta).unwrap_or_else(|_| chrono::Duration::zero()),
        }
    }
}

/// A finished session waiting for its note
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSession {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub elapsed: Duration,
    pub mode: TimerMode,
}

impl CompletedSession {
    pub fn into_record(self, note: impl Into<String>) -> SessionRecord {
        SessionRecord::new(self.start, self.end, self.elapsed, self.mode, note)
    }

    pub fn minutes(&self) -> f64 {
        super::record::minutes_from_secs(self.elapsed.as_secs_f64())
    }
}

/// Session timer: count-up or count-down with pause/resume.
///
/// `elapsed = accumulated + (now - anchor)` while running; pausing folds the
/// running interval into `accumulated`.
#[derive(Debug, Clone, Default)]
pub struct SessionTimer {
    mode: TimerMode,
    status: TimerStatus,
    /// When the current running interval began (not persisted)
    anchor: Option<Instant>,
    accumulated: Duration,
    /// Count-down length, meaningless for count-up
    target: Option<Duration>,
    /// Wall-clock time of the first start, becomes the record's start
    started_wall: Option<NaiveDateTime>,
}

impl SessionTimer {
    pub fn count_up() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn target(&self) -> Option<Duration> {
        self.target
    }

    /// Switch an idle timer to count-down with the given length
    pub fn configure_countdown(&mut self, target: Duration) -> Result<(), TimerError> {
        if self.status != TimerStatus::Idle {
            return Err(TimerError::SessionInProgress);
        }
        if target.as_secs() == 0 {
            return Err(TimerError::InvalidTarget);
        }
        self.mode = TimerMode::CountDown;
        self.target = Some(target);
        self.accumulated = Duration::ZERO;
        Ok(())
    }

    /// Switch an idle timer back to open-ended count-up
    pub fn configure_count_up(&mut self) -> Result<(), TimerError> {
        if self.status != TimerStatus::Idle {
            return Err(TimerError::SessionInProgress);
        }
        *self = Self::default();
        Ok(())
    }

    /// Start the timer
    pub fn start_at(&mut self, at: Moment) -> Result<(), TimerError> {
        match self.status {
            TimerStatus::Idle => {
                self.anchor = Some(at.instant);
                self.started_wall = Some(at.wall);
                self.status = TimerStatus::Running;
                Ok(())
            }
            TimerStatus::Running => Err(TimerError::AlreadyRunning),
            TimerStatus::Paused => self.resume_at(at),
            TimerStatus::Finished => Err(TimerError::UnsavedSession),
        }
    }

    /// Pause the timer and accumulate elapsed time
    pub fn pause_at(&mut self, at: Moment) -> Result<(), TimerError> {
        if self.status != TimerStatus::Running {
            return Err(TimerError::NotRunning);
        }
        if let Some(anchor) = self.anchor.take() {
            self.accumulated += at.instant.saturating_duration_since(anchor);
        }
        self.accumulated = self.clamp_to_target(self.accumulated);
        self.status = TimerStatus::Paused;
        Ok(())
    }

    /// Resume a paused timer, keeping what has accumulated so far
    pub fn resume_at(&mut self, at: Moment) -> Result<(), TimerError> {
        match self.status {
            TimerStatus::Paused => {
                self.anchor = Some(at.instant);
                self.status = TimerStatus::Running;
                Ok(())
            }
            TimerStatus::Running => Err(TimerError::AlreadyRunning),
            _ => Err(TimerError::NotPaused),
        }
    }

    /// Toggle between running and paused (starts an idle timer)
    pub fn toggle_at(&mut self, at: Moment) -> Result<TimerStatus, TimerError> {
        match self.status {
            TimerStatus::Idle => self.start_at(at)?,
            TimerStatus::Paused => self.resume_at(at)?,
            TimerStatus::Running => self.pause_at(at)?,
            TimerStatus::Finished => return Err(TimerError::UnsavedSession),
        }
        Ok(self.status)
    }

    /// Elapsed study time, side-effect free
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        let running = match (self.status, self.anchor) {
            (TimerStatus::Running, Some(anchor)) => now.saturating_duration_since(anchor),
            _ => Duration::ZERO,
        };
        self.clamp_to_target(self.accumulated + running)
    }

    /// Time left on a count-down; `None` in count-up mode
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining_at(Instant::now())
    }

    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.target
            .map(|target| target.saturating_sub(self.elapsed_at(now)))
    }

    /// Move a running count-down to `Finished` once it reaches zero.
    /// Returns true only on the transition itself.
    pub fn check_expiry_at(&mut self, now: Instant) -> bool {
        if self.mode != TimerMode::CountDown || self.status != TimerStatus::Running {
            return false;
        }
        let Some(target) = self.target else {
            return false;
        };
        if self.elapsed_at(now) < target {
            return false;
        }

        self.accumulated = target;
        self.anchor = None;
        self.status = TimerStatus::Finished;
        true
    }

    /// Stop the timer and hand back the completed session, resetting the
    /// timer to idle count-up. Zero elapsed time is rejected and leaves the
    /// timer's configuration untouched.
    pub fn finish(&mut self) -> Result<CompletedSession, TimerError> {
        self.finish_at(Moment::now())
    }

    pub fn finish_at(&mut self, at: Moment) -> Result<CompletedSession, TimerError> {
        if self.status == TimerStatus::Running {
            self.pause_at(at)?;
        }

        let elapsed = self.elapsed_at(at.instant);
        if elapsed.is_zero() {
            return Err(TimerError::NothingToSave);
        }

        let start = self.started_wall.unwrap_or(at.wall);
        let completed = CompletedSession {
            start,
            end: at.wall.max(start),
            elapsed,
            mode: self.mode,
        };

        *self = Self::default();
        Ok(completed)
    }

    fn clamp_to_target(&self, elapsed: Duration) -> Duration {
        match (self.mode, self.target) {
            (TimerMode::CountDown, Some(target)) => elapsed.min(target),
            _ => elapsed,
        }
    }
}
