use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{draw_function_keys, draw_header, Outcome, ScreenId};
use crate::registry::Registry;
use crate::tui::clock::Clock;
use crate::tui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckOutChoice {
    Yes,
    No,
    Unset,
}

/// Y/N confirmation before the current guest's stay is closed out.
pub struct CheckOutScreen {
    choice: CheckOutChoice,
}

impl CheckOutScreen {
    pub fn new() -> Self {
        Self { choice: CheckOutChoice::Unset }
    }

    pub fn handle_key(&mut self, key: KeyEvent, registry: &mut Registry) -> Result<Outcome> {
        if registry.current_guest().is_none() {
            // Nothing to confirm; any key returns.
            return Ok(Outcome::Navigate(ScreenId::MainMenu));
        }

        match key.code {
            KeyCode::Esc => return Ok(Outcome::Navigate(ScreenId::MainMenu)),
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'y') => self.choice = CheckOutChoice::Yes,
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'n') => self.choice = CheckOutChoice::No,
            KeyCode::Backspace => self.choice = CheckOutChoice::Unset,
            KeyCode::Enter => match self.choice {
                CheckOutChoice::Yes => {
                    let departed = registry.check_out()?;
                    let message = departed
                        .map(|g| format!("CHECKED OUT: {}", g.full_name()))
                        .unwrap_or_else(|| "NO GUEST CHECKED IN".to_string());
                    return Ok(Outcome::NavigateWithStatus(ScreenId::MainMenu, message));
                }
                CheckOutChoice::No => return Ok(Outcome::Navigate(ScreenId::MainMenu)),
                CheckOutChoice::Unset => {}
            },
            _ => {}
        }
        Ok(Outcome::Stay)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, clock: &Clock, registry: &Registry) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        draw_header(f, chunks[0], theme, clock, "GUEST CHECK-OUT", "CHK002");

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(Span::styled(" CHECK-OUT CONFIRMATION ", theme.label_style()));
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);

        let mut lines = Vec::new();
        match registry.current_guest() {
            None => {
                lines.push(Line::from(Span::styled(
                    "NO GUEST IS CURRENTLY CHECKED IN",
                    theme.status_style(),
                )));
                lines.push(Line::raw(""));
                lines.push(Line::from(Span::styled("PRESS ANY KEY TO RETURN", theme.key_style())));
            }
            Some(guest) => {
                let booking = guest
                    .current_booking()
                    .map(|b| b.booking_id.clone())
                    .unwrap_or_else(|| "UNKNOWN".to_string());
                let choice_display = match self.choice {
                    CheckOutChoice::Yes => "Y",
                    CheckOutChoice::No => "N",
                    CheckOutChoice::Unset => "_",
                };
                lines.push(Line::from(Span::styled(
                    "ARE YOU SURE YOU WANT TO CHECK OUT:",
                    theme.label_style(),
                )));
                lines.push(Line::raw(""));
                lines.push(Line::from(Span::styled(guest.full_name(), theme.title_style())));
                lines.push(Line::from(vec![
                    Span::styled("BOOKING: ", theme.label_style()),
                    Span::styled(booking, theme.value_style()),
                ]));
                lines.push(Line::raw(""));
                lines.push(Line::from(vec![
                    Span::styled("ENTER CHOICE (Y/N): ", theme.label_style()),
                    Span::styled(choice_display, theme.editing_style()),
                ]));
                lines.push(Line::raw(""));
                let status = if self.choice == CheckOutChoice::Unset {
                    "ENTER Y FOR YES, N FOR NO"
                } else {
                    "PRESS ENTER TO CONFIRM"
                };
                lines.push(Line::from(Span::styled(status, theme.status_style())));
            }
        }
        f.render_widget(Paragraph::new(lines), inner);

        draw_function_keys(f, chunks[2], theme, &["ESC=CANCEL", "Y/N=CHOICE", "ENTER=CONFIRM"]);
    }
}
