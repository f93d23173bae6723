use crate::app::AppState;
use crate::domain::{format_hms, TimerMode, TimerStatus};
use crate::ui::styles::{
    border_style, clock_style, done_style, gauge_style, idle_style, paused_style, running_style,
    title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use std::time::Duration;

/// Clock text: remaining time for a count-down, elapsed time otherwise.
/// A session waiting for its note keeps showing its final reading.
pub fn clock_text(app: &AppState) -> String {
    if let Some(done) = app.session.pending() {
        return match done.mode {
            TimerMode::CountDown => format_hms(Duration::ZERO),
            TimerMode::CountUp => format_hms(done.elapsed),
        };
    }

    let timer = app.session.timer();
    match timer.remaining() {
        Some(remaining) => format_hms(remaining),
        None => format_hms(timer.elapsed()),
    }
}

fn mode_text(app: &AppState) -> String {
    let timer = app.session.timer();
    match timer.target() {
        Some(target) if timer.mode() == TimerMode::CountDown => format!(
            "Mode: {} {:.1} min",
            timer.mode().label(),
            target.as_secs_f64() / 60.0
        ),
        _ => format!("Mode: {}", timer.mode().label()),
    }
}

fn status_badge(app: &AppState) -> (&'static str, Style) {
    if app.session.pending().is_some() {
        return ("● Waiting for a note", done_style());
    }
    match app.session.timer().status() {
        TimerStatus::Idle => ("○ Ready (Space to start)", idle_style()),
        TimerStatus::Running => ("▶ Running", running_style()),
        TimerStatus::Paused => ("⏸ Paused", paused_style()),
        TimerStatus::Finished => ("● Time's up", done_style()),
    }
}

/// Render the timer pane
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" ⏱ Study Timer ", title_style()))
        .border_style(border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode
            Constraint::Length(1), // Clock
            Constraint::Length(1), // Status badge
            Constraint::Length(1), // Status message
            Constraint::Length(1), // Gauge
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(mode_text(app)).alignment(Alignment::Center),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(clock_text(app), clock_style())).alignment(Alignment::Center),
        chunks[1],
    );

    let (badge, style) = status_badge(app);
    f.render_widget(
        Paragraph::new(Span::styled(badge, style)).alignment(Alignment::Center),
        chunks[2],
    );

    if let Some(message) = &app.status {
        f.render_widget(
            Paragraph::new(Line::raw(message.as_str())).alignment(Alignment::Center),
            chunks[3],
        );
    }

    let timer = app.session.timer();
    if let (TimerMode::CountDown, Some(target)) = (timer.mode(), timer.target()) {
        let ratio = if target.is_zero() {
            0.0
        } else {
            (timer.elapsed().as_secs_f64() / target.as_secs_f64()).clamp(0.0, 1.0)
        };
        let gauge = Gauge::default()
            .gauge_style(gauge_style())
            .ratio(ratio)
            .label(format!("{:.0}%", ratio * 100.0));
        f.render_widget(gauge, chunks[4]);
    }
}
