use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the message dialog
pub fn render_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(modal) = &app.modal {
        let modal_area = create_modal_area(area);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw("")];
        for text in modal.message.lines() {
            lines.push(Line::raw(format!("  {}", text)));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("  [Esc]", modal_title_style()),
            Span::raw(" Close"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(format!(" {} ", modal.title), modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

/// Render the "draw a chart?" question of the recent-trend flow
pub fn render_chart_prompt(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(days) = app.pending_days else {
        return;
    };
    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  Draw a line chart for the last {} days?", days)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Chart  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Text only  "),
            Span::styled("[Esc]", modal_title_style()),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" 📈 Recent Trend ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
