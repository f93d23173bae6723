use crate::app::{AppState, InputKind};
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true once the app should exit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C quits from anywhere; an open note form is saved as-is first
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        match app.input_form.as_ref().map(|form| form.kind) {
            Some(InputKind::Note) => {
                app.quit_after_save = true;
                app.submit_input_form()?;
            }
            Some(_) => app.cancel_input_form()?,
            None => {}
        }
        if !app.should_quit {
            app.request_quit();
        }
        return Ok(app.should_quit);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Modal => handle_modal_mode(app, key),
        UiMode::EditingInput => handle_input_form_mode(app, key),
        UiMode::ChartPrompt => handle_chart_prompt_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Start / pause / resume
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_run_pause(),

        KeyCode::Char('c') | KeyCode::Char('C') => app.start_custom_countdown(),
        KeyCode::Char('p') | KeyCode::Char('P') => app.start_pomodoro(),

        // Finish and save
        KeyCode::Char('f') | KeyCode::Char('F') => app.finish_and_save(),

        // Stats
        KeyCode::Char('t') | KeyCode::Char('T') => app.show_today(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.show_recent(),

        // Hide the trend pane
        KeyCode::Esc => app.recent = None,

        KeyCode::Char('q') | KeyCode::Char('Q') => app.request_quit(),

        _ => {}
    }
    Ok(app.should_quit)
}

/// Handle keys while a message dialog is open
fn handle_modal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => app.close_modal(),
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.close_modal();
            app.request_quit();
        }
        _ => {}
    }
    Ok(app.should_quit)
}

/// Handle keys in an input form
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form()?,
        KeyCode::Esc => app.cancel_input_form()?,
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(app.should_quit)
}

/// Handle the "draw a chart?" question
fn handle_chart_prompt_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.chart_choice(true)?,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter => app.chart_choice(false)?,
        KeyCode::Esc => {
            app.pending_days = None;
            app.ui_mode = UiMode::Normal;
        }
        _ => {}
    }
    Ok(app.should_quit)
}
