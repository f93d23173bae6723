use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows taken by the timer pane
const TIMER_PANE_HEIGHT: u16 = 8;

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub timer_area: Rect,
    pub stats_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Timer pane: clock, mode, status and count-down gauge
/// - Stats pane: today's total and the trend window (rest of the screen)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                 // Keybindings bar
            Constraint::Length(TIMER_PANE_HEIGHT), // Timer
            Constraint::Min(0),                    // Stats
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        timer_area: chunks[1],
        stats_area: chunks[2],
    }
}

/// Create a centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.timer_area.height, TIMER_PANE_HEIGHT);
        assert_eq!(layout.stats_area.height, 50 - 1 - TIMER_PANE_HEIGHT);
        assert_eq!(layout.stats_area.y, 1 + TIMER_PANE_HEIGHT);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert!(modal.height < area.height);
        assert_eq!(modal.height, 10);
    }
}
