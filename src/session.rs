use crate::config::Config;
use crate::domain::{CompletedSession, Moment, SessionRecord, SessionTimer, TimerStatus};
use crate::error::TimerError;
use crate::persistence::LogStore;
use crate::report::{recent_totals, today_total, DailyTotal, DayTotal};
use anyhow::Result;
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What a refresh tick observed
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// A count-down ran out; the session now waits for its note
    Expired(CompletedSession),
}

/// The timing core shared by both shells: one timer, one log, and the
/// finished-but-unsaved session between `finish` and `save_pending`.
pub struct StudySession {
    timer: SessionTimer,
    store: LogStore,
    pending: Option<CompletedSession>,
    pomodoro: Duration,
}

impl StudySession {
    pub fn new(store: LogStore, config: &Config) -> Self {
        Self {
            timer: SessionTimer::count_up(),
            store,
            pending: None,
            pomodoro: config.pomodoro,
        }
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn pending(&self) -> Option<&CompletedSession> {
        self.pending.as_ref()
    }

    pub fn pomodoro(&self) -> Duration {
        self.pomodoro
    }

    /// True when quitting now would lose recorded time
    pub fn has_unsaved_time(&self) -> bool {
        self.pending.is_some() || !self.timer.elapsed().is_zero()
    }

    fn guard_pending(&self) -> Result<(), TimerError> {
        if self.pending.is_some() {
            return Err(TimerError::UnsavedSession);
        }
        Ok(())
    }

    /// Start / pause / resume
    pub fn toggle(&mut self) -> Result<TimerStatus, TimerError> {
        self.toggle_at(Moment::now())
    }

    pub fn toggle_at(&mut self, at: Moment) -> Result<TimerStatus, TimerError> {
        self.guard_pending()?;
        let status = self.timer.toggle_at(at)?;
        debug!(?status, mode = self.timer.mode().to_tag(), "timer toggled");
        Ok(status)
    }

    /// Start an open-ended session right away
    pub fn start_count_up_at(&mut self, at: Moment) -> Result<(), TimerError> {
        self.guard_pending()?;
        self.timer.configure_count_up()?;
        self.timer.start_at(at)
    }

    /// Arm a count-down; it starts on the next toggle
    pub fn configure_countdown(&mut self, target: Duration) -> Result<(), TimerError> {
        self.guard_pending()?;
        self.timer.configure_countdown(target)?;
        info!(secs = target.as_secs(), "count-down configured");
        Ok(())
    }

    /// Arm the fixed pomodoro count-down
    pub fn configure_pomodoro(&mut self) -> Result<(), TimerError> {
        self.configure_countdown(self.pomodoro)
    }

    /// Arm and immediately start a count-down
    pub fn start_countdown_at(&mut self, target: Duration, at: Moment) -> Result<(), TimerError> {
        self.configure_countdown(target)?;
        self.timer.start_at(at)
    }

    /// Stop the timer and park the completed session until it gets a note
    pub fn finish(&mut self) -> Result<&CompletedSession, TimerError> {
        self.finish_at(Moment::now())
    }

    pub fn finish_at(&mut self, at: Moment) -> Result<&CompletedSession, TimerError> {
        self.guard_pending()?;
        let completed = self.timer.finish_at(at)?;
        info!(
            secs = completed.elapsed.as_secs(),
            mode = completed.mode.to_tag(),
            "session finished"
        );
        Ok(self.pending.insert(completed))
    }

    /// Periodic refresh: detects count-down expiry. Reports `Expired` once
    /// per session; the completed session is parked as pending.
    pub fn tick(&mut self) -> Option<TickEvent> {
        self.tick_at(Moment::now())
    }

    pub fn tick_at(&mut self, at: Moment) -> Option<TickEvent> {
        if !self.timer.check_expiry_at(at.instant) {
            return None;
        }

        match self.timer.finish_at(at) {
            Ok(completed) => {
                info!(secs = completed.elapsed.as_secs(), "count-down expired");
                self.pending = Some(completed.clone());
                Some(TickEvent::Expired(completed))
            }
            Err(_) => None,
        }
    }

    /// Append the pending session with its note. Returns `None` when there
    /// was nothing pending.
    pub fn save_pending(&mut self, note: &str) -> Result<Option<SessionRecord>> {
        let Some(completed) = self.pending.take() else {
            return Ok(None);
        };

        let record = completed.clone().into_record(note.trim());
        if let Err(e) = self.store.append(&record) {
            // Keep the session so the caller can retry or report it
            self.pending = Some(completed);
            return Err(e);
        }
        info!(minutes = record.duration_minutes, "session saved");
        Ok(Some(record))
    }

    /// Shutdown path: stop whatever is still timing and append it without a
    /// note. An idle timer is not an error here.
    pub fn save_on_exit(&mut self) -> Result<Option<SessionRecord>> {
        self.save_on_exit_at(Moment::now())
    }

    pub fn save_on_exit_at(&mut self, at: Moment) -> Result<Option<SessionRecord>> {
        if self.pending.is_none() {
            match self.finish_at(at) {
                Ok(_) | Err(TimerError::NothingToSave) => {}
                Err(e) => warn!(error = %e, "could not finish session on exit"),
            }
        }
        self.save_pending("")
    }

    /// Today's total (or any other day's)
    pub fn total_for_day(&self, date: NaiveDate) -> Result<DayTotal> {
        today_total(&self.store, date)
    }

    /// Trailing N-day totals ending at `reference`
    pub fn daily_totals(&self, days: u32, reference: NaiveDate) -> Result<Vec<DailyTotal>> {
        recent_totals(&self.store, days, reference)
    }
}
