use crate::app::AppState;
use crate::domain::format_minutes;
use crate::report::{recent_summary, DailyTotal};
use crate::ui::styles::{border_style, chart_style, default_style, hint_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Smallest area a line chart is drawn into
const MIN_CHART_WIDTH: u16 = 30;
const MIN_CHART_HEIGHT: u16 = 8;

/// Whether `area` is big enough for a readable chart
pub fn chart_fits(area: Rect) -> bool {
    area.width >= MIN_CHART_WIDTH && area.height >= MIN_CHART_HEIGHT
}

fn today_line(app: &AppState) -> Line<'static> {
    if app.today.sessions == 0 {
        return Line::from(Span::styled("Today: nothing recorded yet", hint_style()));
    }
    Line::from(vec![
        Span::styled("Today: ", title_style()),
        Span::raw(format!(
            "{} sessions, {:.2} min ({})",
            app.today.sessions,
            app.today.minutes,
            format_minutes(app.today.minutes)
        )),
    ])
}

/// Render the stats pane: today's total, then the trend window if one is open
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" 📊 Stats ", title_style()))
        .border_style(border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Today
            Constraint::Length(1), // Spacing
            Constraint::Min(0),    // Trend
        ])
        .split(inner);

    f.render_widget(Paragraph::new(today_line(app)), chunks[0]);

    match &app.recent {
        Some(view) if view.chart && chart_fits(chunks[2]) => {
            render_chart(f, &view.totals, chunks[2]);
        }
        Some(view) => {
            let text = recent_summary(&view.totals);
            f.render_widget(Paragraph::new(text).style(default_style()), chunks[2]);
        }
        None => {
            f.render_widget(
                Paragraph::new(Span::styled("Press n to see the recent trend", hint_style())),
                chunks[2],
            );
        }
    }
}

fn render_chart(f: &mut Frame, totals: &[DailyTotal], area: Rect) {
    let data: Vec<(f64, f64)> = totals
        .iter()
        .enumerate()
        .map(|(i, day)| (i as f64, day.minutes))
        .collect();

    let max = data.iter().map(|(_, m)| *m).fold(0.0_f64, f64::max).max(1.0);
    let last_x = data.len().saturating_sub(1).max(1) as f64;

    let first_label = totals
        .first()
        .map(|d| d.date.format("%m-%d").to_string())
        .unwrap_or_default();
    let last_label = totals
        .last()
        .map(|d| d.date.format("%m-%d").to_string())
        .unwrap_or_default();

    let datasets = vec![Dataset::default()
        .name("minutes")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(chart_style())
        .data(&data)];

    let chart = Chart::new(datasets)
        .block(Block::default().title(Span::styled(
            format!(" Last {} days ", totals.len()),
            title_style(),
        )))
        .x_axis(
            Axis::default()
                .style(hint_style())
                .bounds([0.0, last_x])
                .labels(vec![Span::raw(first_label), Span::raw(last_label)]),
        )
        .y_axis(
            Axis::default()
                .title("min")
                .style(hint_style())
                .bounds([0.0, max * 1.1])
                .labels(vec![Span::raw("0"), Span::raw(format!("{:.0}", max))]),
        );

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_fits() {
        assert!(chart_fits(Rect::new(0, 0, 80, 20)));
        assert!(!chart_fits(Rect::new(0, 0, 20, 20)));
        assert!(!chart_fits(Rect::new(0, 0, 80, 4)));
    }
}
