use crate::app::{AppState, InputKind};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the single-line input form (count-down minutes, days, or note)
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw(""), Line::raw(format!("  {}", form.kind.prompt()))];
        lines.push(Line::from(vec![
            Span::raw("  > "),
            Span::styled(form.value.as_str(), modal_title_style()),
            Span::styled("█", modal_title_style()), // Cursor
        ]));
        lines.push(Line::raw(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(format!("  {}", error), error_style())));
            lines.push(Line::raw(""));
        }

        let hint = match form.kind {
            InputKind::Note => "  Enter to save  ·  Esc saves without a note",
            _ => "  Enter to submit  ·  Esc to cancel",
        };
        lines.push(Line::raw(hint));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(form.kind.title(), modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
