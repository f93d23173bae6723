pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod stats_pane;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_chart_prompt, render_modal};
use ratatui::Frame;
use stats_pane::render_stats_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_timer_pane(f, app, layout.timer_area);
    render_stats_pane(f, app, layout.stats_area);

    // Dialogs: a form takes precedence over the others
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    } else if app.ui_mode == UiMode::ChartPrompt {
        render_chart_prompt(f, app, size);
    } else if app.modal.is_some() {
        render_modal(f, app, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::Moment;
    use crate::persistence::LogStore;
    use crate::session::StudySession;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn create_test_app() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_log_file(dir.path().join("study_log.csv"));
        let session = StudySession::new(LogStore::new(config.log_file.clone()), &config);
        (dir, AppState::new(session, &config))
    }

    fn draw(app: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_idle_window() {
        let (_dir, app) = create_test_app();
        let screen = draw(&app, 100, 30);
        assert!(screen.contains("Study Timer"));
        assert!(screen.contains("00:00:00"));
        assert!(screen.contains("Press n to see the recent trend"));
    }

    #[test]
    fn test_render_chart_falls_back_to_text_when_small() {
        let (_dir, mut app) = create_test_app();
        app.show_recent();
        app.submit_input_form().unwrap();
        app.chart_choice(true).unwrap();

        let screen = draw(&app, 100, 14);
        assert!(screen.contains("Study time over the last 7 days:"));
    }

    #[test]
    fn test_render_note_form() {
        let (_dir, mut app) = create_test_app();
        let t0 = Moment::now();
        app.session.start_count_up_at(t0).unwrap();
        app.session.finish_at(t0.after(Duration::from_secs(30))).unwrap();
        app.finish_and_save();

        let screen = draw(&app, 100, 30);
        assert!(screen.contains("Session Note"));
        assert!(screen.contains("00:00:30"));
    }
}
