use crate::config::Config;
use crate::domain::{parse_days, parse_minutes, Moment, TimerStatus, UiMode};
use crate::error::TimerError;
use crate::notifications;
use crate::report::{today_summary, DailyTotal, DayTotal};
use crate::session::{StudySession, TickEvent};
use anyhow::Result;
use chrono::Local;
use tracing::{info, warn};

/// What an input form is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    CountdownMinutes,
    RecentDays,
    Note,
}

impl InputKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::CountdownMinutes => " Custom Count-down ",
            Self::RecentDays => " Recent Days ",
            Self::Note => " Session Note ",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Self::CountdownMinutes => "Minutes to study:",
            Self::RecentDays => "How many days? (empty for the default)",
            Self::Note => "Add a note for this session (optional):",
        }
    }
}

/// Single-line input form
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub kind: InputKind,
    pub value: String,
    pub error: Option<String>,
}

impl InputFormState {
    fn new(kind: InputKind) -> Self {
        Self {
            kind,
            value: String::new(),
            error: None,
        }
    }
}

/// Informational dialog, dismissed with Esc or Enter
#[derive(Debug, Clone)]
pub struct ModalState {
    pub title: String,
    pub message: String,
}

/// The trend window currently shown in the stats pane
#[derive(Debug, Clone)]
pub struct RecentView {
    pub totals: Vec<DailyTotal>,
    pub chart: bool,
}

/// Main application state of the terminal window
pub struct AppState {
    pub session: StudySession,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub modal: Option<ModalState>,
    pub today: DayTotal,
    pub recent: Option<RecentView>,
    pub status: Option<String>,
    pub pending_days: Option<u32>,
    pub quit_after_save: bool,
    pub should_quit: bool,
    default_days: u32,
    max_days: u32,
}

impl AppState {
    pub fn new(session: StudySession, config: &Config) -> Self {
        let mut app = Self {
            session,
            ui_mode: UiMode::Normal,
            input_form: None,
            modal: None,
            today: DayTotal::default(),
            recent: None,
            status: None,
            pending_days: None,
            quit_after_save: false,
            should_quit: false,
            default_days: config.default_recent_days,
            max_days: config.max_recent_days,
        };
        app.refresh_today();
        app
    }

    fn refresh_today(&mut self) {
        match self.session.total_for_day(Local::now().date_naive()) {
            Ok(total) => self.today = total,
            Err(e) => warn!(error = %e, "could not read today's total"),
        }
    }

    fn refresh_recent(&mut self) {
        let Some(view) = &self.recent else {
            return;
        };
        let days = view.totals.len() as u32;
        match self.session.daily_totals(days, Local::now().date_naive()) {
            Ok(totals) => {
                if let Some(view) = self.recent.as_mut() {
                    view.totals = totals;
                }
            }
            Err(e) => warn!(error = %e, "could not refresh recent totals"),
        }
    }

    fn show_message(&mut self, title: &str, message: impl Into<String>) {
        self.modal = Some(ModalState {
            title: title.to_string(),
            message: message.into(),
        });
        self.ui_mode = UiMode::Modal;
    }

    fn open_form(&mut self, kind: InputKind) {
        self.input_form = Some(InputFormState::new(kind));
        self.ui_mode = UiMode::EditingInput;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Start, pause or resume
    pub fn toggle_run_pause(&mut self) {
        match self.session.toggle() {
            Ok(TimerStatus::Running) => self.status = Some("Running".to_string()),
            Ok(TimerStatus::Paused) => self.status = Some("Paused".to_string()),
            Ok(_) => {}
            Err(e) => self.show_message("Notice", e.to_string()),
        }
    }

    /// Ask for the length of a custom count-down
    pub fn start_custom_countdown(&mut self) {
        if self.session.pending().is_some() {
            self.show_message("Notice", TimerError::UnsavedSession.to_string());
            return;
        }
        if self.session.timer().status().is_in_progress() {
            self.show_message("Notice", TimerError::SessionInProgress.to_string());
            return;
        }
        self.open_form(InputKind::CountdownMinutes);
    }

    /// Arm the pomodoro preset; Space starts it
    pub fn start_pomodoro(&mut self) {
        match self.session.configure_pomodoro() {
            Ok(()) => {
                let minutes = self.session.pomodoro().as_secs() / 60;
                self.status = Some(format!("Pomodoro {} min set, press Space to start", minutes));
            }
            Err(e) => self.show_message("Notice", e.to_string()),
        }
    }

    /// Stop the clock and ask for a note
    pub fn finish_and_save(&mut self) {
        if self.session.pending().is_some() {
            self.open_form(InputKind::Note);
            return;
        }

        match self.session.finish() {
            Ok(_) => self.open_form(InputKind::Note),
            Err(TimerError::NothingToSave) => {
                self.show_message("Notice", "No running or paused session to save.");
            }
            Err(e) => self.show_message("Notice", e.to_string()),
        }
    }

    pub fn show_today(&mut self) {
        self.refresh_today();
        let summary = today_summary(&self.today);
        self.show_message("Today", summary);
    }

    pub fn show_recent(&mut self) {
        self.open_form(InputKind::RecentDays);
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = self.input_form.as_mut() {
            form.value.push(c);
            form.error = None;
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = self.input_form.as_mut() {
            form.value.pop();
            form.error = None;
        }
    }

    /// Validate and apply the open form. Invalid numbers keep the form open
    /// with an error line.
    pub fn submit_input_form(&mut self) -> Result<()> {
        let Some(mut form) = self.input_form.take() else {
            return Ok(());
        };

        match form.kind {
            InputKind::CountdownMinutes => match parse_minutes(&form.value) {
                Ok(target) => {
                    self.ui_mode = UiMode::Normal;
                    match self.session.configure_countdown(target) {
                        Ok(()) => {
                            self.status = Some(format!(
                                "Count-down {:.1} min set, press Space to start",
                                target.as_secs_f64() / 60.0
                            ));
                        }
                        Err(e) => self.show_message("Notice", e.to_string()),
                    }
                }
                Err(e) => {
                    form.error = Some(e.to_string());
                    self.input_form = Some(form);
                }
            },
            InputKind::RecentDays => {
                let parsed = if form.value.trim().is_empty() {
                    Ok(self.default_days)
                } else {
                    parse_days(&form.value, self.max_days)
                };
                match parsed {
                    Ok(days) => {
                        self.pending_days = Some(days);
                        self.ui_mode = UiMode::ChartPrompt;
                    }
                    Err(e) => {
                        form.error = Some(e.to_string());
                        self.input_form = Some(form);
                    }
                }
            }
            InputKind::Note => {
                self.ui_mode = UiMode::Normal;
                self.save_note(&form.value)?;
            }
        }
        Ok(())
    }

    /// Close the open form. A dismissed note still saves the session, with
    /// an empty note.
    pub fn cancel_input_form(&mut self) -> Result<()> {
        let Some(form) = self.input_form.take() else {
            return Ok(());
        };
        self.ui_mode = UiMode::Normal;

        if form.kind == InputKind::Note {
            self.save_note("")?;
        }
        Ok(())
    }

    fn save_note(&mut self, note: &str) -> Result<()> {
        if let Some(record) = self.session.save_pending(note)? {
            self.refresh_today();
            self.refresh_recent();
            self.status = None;
            if !self.quit_after_save {
                self.show_message(
                    "Saved",
                    format!(
                        "{:.2} minutes saved to {}",
                        record.duration_minutes,
                        self.session.store().path().display()
                    ),
                );
            }
        }

        if self.quit_after_save {
            self.should_quit = true;
        }
        Ok(())
    }

    /// Answer to the "draw a chart?" prompt
    pub fn chart_choice(&mut self, chart: bool) -> Result<()> {
        self.ui_mode = UiMode::Normal;
        let Some(days) = self.pending_days.take() else {
            return Ok(());
        };

        let totals = self.session.daily_totals(days, Local::now().date_naive())?;
        info!(days, chart, "recent totals shown");
        self.recent = Some(RecentView { totals, chart });
        Ok(())
    }

    /// Refresh tick: watch for count-down expiry
    pub fn tick(&mut self) {
        self.tick_at(Moment::now());
    }

    pub fn tick_at(&mut self, at: Moment) {
        if let Some(TickEvent::Expired(done)) = self.session.tick_at(at) {
            notifications::notify_countdown_finished(done.minutes());
            self.modal = None;
            self.pending_days = None;
            self.status = Some("Time's up! Well done.".to_string());
            self.open_form(InputKind::Note);
        }
    }

    /// Quit, first saving any time on the clock through the note form
    pub fn request_quit(&mut self) {
        if !self.session.has_unsaved_time() {
            self.should_quit = true;
            return;
        }

        self.quit_after_save = true;
        self.modal = None;
        self.finish_and_save();
        if self.input_form.is_none() {
            self.should_quit = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimerMode;
    use crate::persistence::LogStore;
    use std::time::Duration;

    fn create_test_app() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_log_file(dir.path().join("study_log.csv"));
        let session = StudySession::new(LogStore::new(config.log_file.clone()), &config);
        (dir, AppState::new(session, &config))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.input_form_add_char(c);
        }
    }

    fn saved(app: &AppState) -> Vec<crate::domain::SessionRecord> {
        app.session.store().scan().unwrap().collect()
    }

    #[test]
    fn test_app_state_new() {
        let (_dir, app) = create_test_app();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.today, DayTotal::default());
        assert!(app.recent.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_toggle_run_pause() {
        let (_dir, mut app) = create_test_app();

        app.toggle_run_pause();
        assert_eq!(app.session.timer().status(), TimerStatus::Running);
        app.toggle_run_pause();
        assert_eq!(app.session.timer().status(), TimerStatus::Paused);
        app.toggle_run_pause();
        assert_eq!(app.session.timer().status(), TimerStatus::Running);
    }

    #[test]
    fn test_finish_opens_note_form_and_saves() {
        let (_dir, mut app) = create_test_app();
        let t0 = Moment::now();
        app.session.start_count_up_at(t0).unwrap();
        app.session.finish_at(t0.after(Duration::from_secs(120))).unwrap();

        app.finish_and_save();
        assert_eq!(app.ui_mode, UiMode::EditingInput);
        assert_eq!(app.input_form.as_ref().unwrap().kind, InputKind::Note);

        type_text(&mut app, "chapter 3");
        app.submit_input_form().unwrap();

        let records = saved(&app);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].duration_minutes, 2.0);
        assert_eq!(records[0].note, "chapter 3");
        assert_eq!(app.ui_mode, UiMode::Modal);
        assert_eq!(app.modal.as_ref().unwrap().title, "Saved");
    }

    #[test]
    fn test_finish_with_nothing_recorded() {
        let (_dir, mut app) = create_test_app();
        app.finish_and_save();

        assert!(app.input_form.is_none());
        assert_eq!(app.ui_mode, UiMode::Modal);
        assert!(saved(&app).is_empty());

        app.close_modal();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_cancel_note_saves_empty_note() {
        let (_dir, mut app) = create_test_app();
        let t0 = Moment::now();
        app.session.start_count_up_at(t0).unwrap();
        app.session.finish_at(t0.after(Duration::from_secs(60))).unwrap();

        app.finish_and_save();
        type_text(&mut app, "discarded text");
        app.cancel_input_form().unwrap();

        let records = saved(&app);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].note, "");
    }

    #[test]
    fn test_custom_countdown_rejects_invalid_minutes() {
        let (_dir, mut app) = create_test_app();
        app.start_custom_countdown();
        type_text(&mut app, "abc");
        app.submit_input_form().unwrap();

        let form = app.input_form.as_ref().unwrap();
        assert!(form.error.is_some());
        assert_eq!(app.ui_mode, UiMode::EditingInput);
        assert_eq!(app.session.timer().mode(), TimerMode::CountUp);

        app.input_form_backspace();
        assert!(app.input_form.as_ref().unwrap().error.is_none());
    }

    #[test]
    fn test_custom_countdown_configures_timer() {
        let (_dir, mut app) = create_test_app();
        app.start_custom_countdown();
        type_text(&mut app, "0.5");
        app.submit_input_form().unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.session.timer().mode(), TimerMode::CountDown);
        assert_eq!(app.session.timer().target(), Some(Duration::from_secs(30)));
        assert_eq!(app.session.timer().status(), TimerStatus::Idle);
    }

    #[test]
    fn test_countdown_refused_while_running() {
        let (_dir, mut app) = create_test_app();
        app.toggle_run_pause();

        app.start_custom_countdown();
        assert!(app.input_form.is_none());
        assert_eq!(app.ui_mode, UiMode::Modal);

        app.close_modal();
        app.start_pomodoro();
        assert_eq!(app.ui_mode, UiMode::Modal);
        assert_eq!(app.session.timer().mode(), TimerMode::CountUp);
    }

    #[test]
    fn test_pomodoro_preset() {
        let (_dir, mut app) = create_test_app();
        app.start_pomodoro();
        assert_eq!(app.session.timer().target(), Some(Duration::from_secs(25 * 60)));
        assert!(app.status.as_ref().unwrap().contains("25 min"));
    }

    #[test]
    fn test_expiry_opens_note_form() {
        let (_dir, mut app) = create_test_app();
        let t0 = Moment::now();
        app.session.start_countdown_at(Duration::from_secs(60), t0).unwrap();

        app.tick_at(t0.after(Duration::from_secs(30)));
        assert!(app.input_form.is_none());

        app.tick_at(t0.after(Duration::from_secs(60)));
        assert_eq!(app.input_form.as_ref().unwrap().kind, InputKind::Note);

        // Further ticks keep running without a second expiry
        app.tick_at(t0.after(Duration::from_secs(61)));
        type_text(&mut app, "done");
        app.submit_input_form().unwrap();

        let records = saved(&app);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].duration_minutes, 1.0);
        assert_eq!(records[0].mode, TimerMode::CountDown);
    }

    #[test]
    fn test_recent_flow() {
        let (_dir, mut app) = create_test_app();
        app.show_recent();
        type_text(&mut app, "400");
        app.submit_input_form().unwrap();
        assert!(app.input_form.as_ref().unwrap().error.is_some());

        app.cancel_input_form().unwrap();
        app.show_recent();
        type_text(&mut app, "14");
        app.submit_input_form().unwrap();
        assert_eq!(app.ui_mode, UiMode::ChartPrompt);

        app.chart_choice(true).unwrap();
        let view = app.recent.as_ref().unwrap();
        assert_eq!(view.totals.len(), 14);
        assert!(view.chart);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_recent_default_days() {
        let (_dir, mut app) = create_test_app();
        app.show_recent();
        app.submit_input_form().unwrap();
        app.chart_choice(false).unwrap();

        let view = app.recent.as_ref().unwrap();
        assert_eq!(view.totals.len(), 7);
        assert!(!view.chart);
    }

    #[test]
    fn test_show_today() {
        let (_dir, mut app) = create_test_app();
        app.show_today();
        let modal = app.modal.as_ref().unwrap();
        assert_eq!(modal.title, "Today");
        assert!(modal.message.contains("No study sessions"));
    }

    #[test]
    fn test_quit_when_idle() {
        let (_dir, mut app) = create_test_app();
        app.request_quit();
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_routes_through_note_form() {
        let (_dir, mut app) = create_test_app();
        let t0 = Moment::now();
        app.session.start_count_up_at(t0).unwrap();
        app.session.toggle_at(t0.after(Duration::from_secs(90))).unwrap();

        app.request_quit();
        assert!(!app.should_quit);
        assert_eq!(app.input_form.as_ref().unwrap().kind, InputKind::Note);

        app.submit_input_form().unwrap();
        assert!(app.should_quit);
        assert!(app.modal.is_none());
        assert_eq!(saved(&app).len(), 1);
    }
}
