use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{draw_function_keys, draw_header, Outcome, ScreenId};
use crate::registry::Registry;
use crate::report::stay::format_period;
use crate::tui::clock::Clock;
use crate::tui::theme::Theme;

/// Read-only view of the current guest's record.
pub struct ViewGuestsScreen;

impl ViewGuestsScreen {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Esc => Outcome::Navigate(ScreenId::MainMenu),
            _ => Outcome::Stay,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, clock: &Clock, registry: &Registry) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        draw_header(f, chunks[0], theme, clock, "GUEST DETAILS", "GST001");

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(Span::styled(" CURRENT GUEST ", theme.label_style()));
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);

        let Some(guest) = registry.current_guest() else {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "NO GUEST CURRENTLY CHECKED IN",
                    theme.status_style(),
                ))),
                inner,
            );
            draw_function_keys(f, chunks[2], theme, &["ESC=RETURN"]);
            return;
        };

        let na = || "N/A".to_string();
        let mut lines = vec![
            section(theme, "PERSONAL INFORMATION"),
            row(theme, "NAME", guest.full_name()),
            row(theme, "NATIONALITY", or_na(&guest.nationality)),
            Line::raw(""),
            section(theme, "CONTACT INFORMATION"),
            row(theme, "EMAIL", or_na(&guest.contact.email)),
            row(theme, "PHONE", or_na(&guest.contact.phone)),
            Line::raw(""),
            section(theme, "IDENTIFICATION"),
        ];
        match &guest.identification {
            Some(id) => {
                lines.push(row(theme, "ID TYPE", id.kind.label().to_string()));
                lines.push(row(theme, "ID NUMBER", or_na(&id.number)));
                lines.push(row(theme, "ISSUING COUNTRY", or_na(&id.issuing_country)));
            }
            None => lines.push(row(theme, "ID TYPE", na())),
        }
        lines.push(Line::raw(""));
        lines.push(section(theme, "BOOKING DETAILS"));
        match guest.current_booking() {
            Some(booking) => {
                lines.push(row(theme, "BOOKING ID", booking.booking_id.clone()));
                lines.push(row(
                    theme,
                    "CHECK-IN DATE",
                    booking.check_in_date.format("%Y-%m-%d").to_string(),
                ));
                lines.push(row(theme, "NUMBER OF NIGHTS", booking.number_of_nights.to_string()));
                lines.push(row(
                    theme,
                    "STAY PERIOD",
                    format_period(booking.check_in_date, booking.number_of_nights),
                ));
                lines.push(row(
                    theme,
                    "NUMBER OF GUESTS",
                    format!(
                        "{} ADULTS / {} CHILDREN",
                        booking.number_of_guests.adults, booking.number_of_guests.children
                    ),
                ));
            }
            None => lines.push(row(theme, "BOOKING", "NO BOOKING INFORMATION AVAILABLE".into())),
        }
        f.render_widget(Paragraph::new(lines), inner);

        draw_function_keys(f, chunks[2], theme, &["ESC=RETURN"]);
    }
}

fn section<'a>(theme: &Theme, title: &'a str) -> Line<'a> {
    Line::from(Span::styled(title, theme.title_style()))
}

fn row<'a>(theme: &Theme, label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:>18}: ", label), theme.label_style()),
        Span::styled(value, theme.value_style()),
    ])
}

fn or_na(value: &str) -> String {
    if value.trim().is_empty() { "N/A".to_string() } else { value.to_string() }
}
