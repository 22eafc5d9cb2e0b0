pub mod check_in;
pub mod check_out;
pub mod main_menu;
pub mod tm30_report;
pub mod view_guests;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::clock::Clock;
use crate::tui::theme::Theme;

/// Which screen the dispatcher should activate next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    MainMenu,
    CheckIn,
    CheckOut,
    ViewGuests,
    Tm30Report,
}

/// Result of handling one input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Stay,
    Navigate(ScreenId),
    /// Navigate and surface a status message on the target screen.
    NavigateWithStatus(ScreenId, String),
    Quit,
}

/// Title bar shared by every screen: name on the left, live clock and
/// screen code on the right.
pub fn draw_header(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    clock: &Clock,
    title: &str,
    screen_code: &str,
) {
    let line = Line::from(vec![
        Span::styled(format!(" {}", title), theme.title_style()),
        Span::raw("  "),
    ]);
    let right = Line::from(vec![
        Span::styled(clock.display(), theme.value_style()),
        Span::raw("  "),
        Span::styled(screen_code, theme.key_style()),
        Span::raw(" "),
    ]);

    let block = Block::default().borders(Borders::ALL).border_style(theme.border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(32)])
        .split(inner);
    f.render_widget(Paragraph::new(line), chunks[0]);
    f.render_widget(Paragraph::new(right).alignment(Alignment::Right), chunks[1]);
}

/// Bottom bar listing the active key bindings, mainframe style.
pub fn draw_function_keys(f: &mut Frame, area: Rect, theme: &Theme, keys: &[&str]) {
    let mut spans = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, theme.key_style()));
    }
    let bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border_style()));
    f.render_widget(bar, area);
}

/// Centered overlay rect for confirmation dialogs.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
