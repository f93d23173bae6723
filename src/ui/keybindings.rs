use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" Space start/pause   "),
        Span::raw("c count-down   "),
        Span::raw("p pomodoro   "),
        Span::raw("f finish & save   "),
        Span::raw("t today   "),
        Span::raw("n recent   "),
        Span::raw("Esc close   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
