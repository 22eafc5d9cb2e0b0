use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{draw_function_keys, draw_header, Outcome, ScreenId};
use crate::registry::Registry;
use crate::tui::clock::Clock;
use crate::tui::theme::Theme;

const ENTRIES: [(&str, ScreenId); 4] = [
    ("1. GUEST CHECK-IN", ScreenId::CheckIn),
    ("2. GUEST CHECK-OUT", ScreenId::CheckOut),
    ("3. GUEST DETAILS", ScreenId::ViewGuests),
    ("4. TM30 REPORT", ScreenId::Tm30Report),
];

pub struct MainMenuScreen {
    list_state: ListState,
    status: Option<String>,
}

impl MainMenuScreen {
    pub fn new(status: Option<String>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state, status }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Outcome::Quit,
            KeyCode::Up => {
                let i = self.list_state.selected().unwrap_or(0);
                self.list_state.select(Some(i.saturating_sub(1)));
                Outcome::Stay
            }
            KeyCode::Down => {
                let i = self.list_state.selected().unwrap_or(0);
                self.list_state.select(Some((i + 1).min(ENTRIES.len() - 1)));
                Outcome::Stay
            }
            KeyCode::Enter => {
                let i = self.list_state.selected().unwrap_or(0);
                Outcome::Navigate(ENTRIES[i].1)
            }
            KeyCode::Char(c) => match c.to_digit(10) {
                Some(n) if (1..=ENTRIES.len() as u32).contains(&n) => {
                    Outcome::Navigate(ENTRIES[n as usize - 1].1)
                }
                _ => Outcome::Stay,
            },
            _ => Outcome::Stay,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme, clock: &Clock, registry: &Registry) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        draw_header(f, chunks[0], theme, clock, "GUESTHOUSE MANAGEMENT SYSTEM", "MNU001");

        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(chunks[1]);

        let status_text = self.status.as_deref().unwrap_or("READY");
        let summary = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("STATUS: ", theme.label_style()),
                Span::styled(status_text, theme.status_style()),
            ]),
            Line::from(vec![
                Span::styled("GUESTS CHECKED IN: ", theme.label_style()),
                Span::styled(registry.guests().len().to_string(), theme.value_style()),
            ]),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(Span::styled(" SYSTEM ", theme.label_style())),
        );
        f.render_widget(summary, body[0]);

        let items: Vec<ListItem> = ENTRIES
            .iter()
            .map(|(label, _)| ListItem::new(Line::from(Span::styled(*label, theme.value_style()))))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style())
                    .title(Span::styled(" MAIN MENU ", theme.label_style())),
            )
            .highlight_style(theme.selected_style())
            .highlight_symbol("> ");
        f.render_stateful_widget(list, body[1], &mut self.list_state);

        draw_function_keys(
            f,
            chunks[2],
            theme,
            &["1-4=SELECT", "\u{2191}\u{2193}=NAVIGATE", "ENTER=OPEN", "Q/ESC=EXIT"],
        );
    }
}
