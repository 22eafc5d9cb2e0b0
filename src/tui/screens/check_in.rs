use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{draw_function_keys, draw_header, Outcome, ScreenId};
use crate::model::guest::{
    Booking, BookingStatus, ContactInfo, Guest, Identification, IdentificationKind, PartySize,
};
use crate::registry::Registry;
use crate::tui::clock::Clock;
use crate::tui::theme::Theme;

struct FieldSpec {
    label: &'static str,
    max_len: usize,
    numeric: bool,
    /// Fallback for an empty or cleared numeric field.
    min: u32,
    max: u32,
}

const fn text_field(label: &'static str, max_len: usize) -> FieldSpec {
    FieldSpec { label, max_len, numeric: false, min: 0, max: 0 }
}

const fn number_field(label: &'static str, min: u32, max: u32) -> FieldSpec {
    FieldSpec { label, max_len: 3, numeric: true, min, max }
}

const FIELDS: [FieldSpec; 9] = [
    text_field("FIRST NAME", 20),
    text_field("LAST NAME", 20),
    text_field("NATIONALITY", 20),
    text_field("PASSPORT NO", 15),
    text_field("EMAIL", 30),
    text_field("PHONE", 15),
    number_field("NUMBER OF NIGHTS", 1, 365),
    number_field("ADULT GUESTS", 1, 10),
    number_field("CHILD GUESTS", 0, 10),
];

/// Sequential field entry, one booking per check-in. Numeric fields accept
/// digits only; everything else about the input is free text.
pub struct CheckInScreen {
    values: Vec<String>,
    current: usize,
    cursor: usize,
    booking_id_preview: String,
}

impl CheckInScreen {
    pub fn new() -> Self {
        Self {
            values: vec![String::new(); FIELDS.len()],
            current: 0,
            cursor: 0,
            booking_id_preview: String::from("NEW BOOKING"),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, registry: &mut Registry) -> Result<Outcome> {
        match key.code {
            KeyCode::Esc => return Ok(Outcome::Navigate(ScreenId::MainMenu)),
            KeyCode::Enter => {
                if self.current + 1 == FIELDS.len() {
                    return self.submit(registry);
                }
                self.advance(1);
            }
            KeyCode::Tab | KeyCode::Down => self.advance(1),
            KeyCode::BackTab | KeyCode::Up => self.advance(-1),
            KeyCode::Char(c) => {
                let spec = &FIELDS[self.current];
                let value = &mut self.values[self.current];
                let accepted = if spec.numeric { c.is_ascii_digit() } else { !c.is_control() };
                if accepted && value.chars().count() < spec.max_len {
                    value.insert(self.cursor, c);
                    self.cursor += c.len_utf8();
                }
            }
            KeyCode::Backspace => {
                let value = &mut self.values[self.current];
                if let Some(c) = value[..self.cursor].chars().next_back() {
                    self.cursor -= c.len_utf8();
                    value.remove(self.cursor);
                }
            }
            KeyCode::Left => {
                if let Some(c) = self.values[self.current][..self.cursor].chars().next_back() {
                    self.cursor -= c.len_utf8();
                }
            }
            KeyCode::Right => {
                if let Some(c) = self.values[self.current][self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
            }
            _ => {}
        }
        Ok(Outcome::Stay)
    }

    fn advance(&mut self, delta: i32) {
        let next = self.current as i32 + delta;
        self.current = next.clamp(0, FIELDS.len() as i32 - 1) as usize;
        self.cursor = self.values[self.current].len();
    }

    /// Empty or cleared numeric input falls back to the field minimum;
    /// digits-only entry means nothing else can reach the parser.
    fn numeric_value(&self, index: usize) -> u32 {
        let spec = &FIELDS[index];
        match self.values[index].parse::<u32>() {
            Ok(n) => n.clamp(spec.min, spec.max),
            Err(e) => {
                if !self.values[index].is_empty() {
                    warn!("Unparsable {} {:?}: {}", spec.label, self.values[index], e);
                }
                spec.min
            }
        }
    }

    fn submit(&mut self, registry: &mut Registry) -> Result<Outcome> {
        let today = Local::now().date_naive();

        let mut guest = Guest::new(self.values[0].trim().to_string(), self.values[1].trim().to_string());
        guest.nationality = self.values[2].trim().to_string();
        guest.contact = ContactInfo {
            email: self.values[4].trim().to_string(),
            phone: self.values[5].trim().to_string(),
        };
        let passport = self.values[3].trim();
        if !passport.is_empty() {
            guest.identification = Some(Identification {
                kind: IdentificationKind::Passport,
                number: passport.to_string(),
                issuing_country: String::new(),
                expiration_date: today,
            });
        }

        let mut booking = Booking::new(
            today,
            self.numeric_value(6),
            PartySize { adults: self.numeric_value(7), children: self.numeric_value(8) },
        );
        booking.status = BookingStatus::CheckedIn;
        let booking_id = booking.booking_id.clone();
        guest.bookings.push(booking);

        registry.check_in(guest)?;
        Ok(Outcome::NavigateWithStatus(
            ScreenId::MainMenu,
            format!("CHECK-IN COMPLETE: {}", booking_id),
        ))
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, clock: &Clock) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        draw_header(f, chunks[0], theme, clock, "GUEST CHECK-IN", "CHK001");

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(Span::styled(" GUEST INFORMATION ", theme.label_style()));
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);

        let mut lines = vec![Line::from(vec![
            Span::styled("BOOKING: ", theme.label_style()),
            Span::styled(self.booking_id_preview.clone(), theme.value_style()),
        ])];
        lines.push(Line::raw(""));
        for (i, spec) in FIELDS.iter().enumerate() {
            let style = if i == self.current { theme.editing_style() } else { theme.value_style() };
            lines.push(Line::from(vec![
                Span::styled(format!("{:>18}: ", spec.label), theme.label_style()),
                Span::styled(self.values[i].clone(), style),
                Span::styled(
                    "_".repeat(spec.max_len.saturating_sub(self.values[i].chars().count())),
                    theme.key_style(),
                ),
            ]));
        }
        lines.push(Line::raw(""));
        let status = if self.current + 1 == FIELDS.len() {
            "PRESS ENTER TO COMPLETE CHECK-IN"
        } else {
            "ENTER GUEST DETAILS"
        };
        lines.push(Line::from(Span::styled(status, theme.status_style())));
        f.render_widget(Paragraph::new(lines), inner);

        // Caret inside the active field.
        let field_row = inner.y + 2 + self.current as u16;
        let prefix = self.values[self.current][..self.cursor].chars().count() as u16;
        let field_col = inner.x + 20 + prefix;
        if field_row < inner.y + inner.height {
            f.set_cursor_position((field_col, field_row));
        }

        draw_function_keys(
            f,
            chunks[2],
            theme,
            &["ESC=RETURN", "TAB=NEXT FIELD", "SHIFT+TAB=PREV FIELD", "ENTER=NEXT/SUBMIT"],
        );
    }
}
