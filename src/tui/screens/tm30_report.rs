use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use log::info;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::fs;
use std::path::PathBuf;

use super::{centered_rect, draw_function_keys, draw_header, Outcome, ScreenId};
use crate::config::Config;
use crate::model::report::{Field, FIELD_ORDER};
use crate::registry::Registry;
use crate::report::editor::{Choice, EditorEvent, EditorReaction, Mode, ReportEditor};
use crate::report::form::{render_form, FormOptions};
use crate::store::KvStore;
use crate::tui::clock::Clock;
use crate::tui::theme::Theme;

fn column_width(field: Field) -> u16 {
    match field {
        Field::BookingId => 11,
        Field::NameAndSurname => 20,
        Field::Nationality => 12,
        Field::PassportNumber => 13,
        Field::TypeOfVisa => 10,
        Field::DateOfArrivalInThailand => 12,
        Field::ExpiryDateOfStay => 12,
        Field::PointOfEntry => 12,
        Field::Relationship => 13,
    }
}

/// The report grid. Cursor/buffer state lives in [`ReportEditor`]; the rows
/// themselves always come from the registry.
pub struct Tm30ReportScreen {
    editor: ReportEditor,
    /// Cell hit-boxes from the last render, for pointer selection.
    cells: Vec<(Rect, usize, Field)>,
    scroll_offset: usize,
}

impl Tm30ReportScreen {
    /// Entering the screen derives the grid from the guest list, unless rows
    /// from an earlier visit are still in flight.
    pub fn enter(registry: &mut Registry) -> Result<Self> {
        registry.ensure_report_rows()?;
        Ok(Self { editor: ReportEditor::new(), cells: Vec::new(), scroll_offset: 0 })
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        registry: &mut Registry,
        config: &Config,
    ) -> Result<Outcome> {
        let event = match key.code {
            KeyCode::Up => EditorEvent::Up,
            KeyCode::Down => EditorEvent::Down,
            KeyCode::Tab => EditorEvent::Tab,
            KeyCode::BackTab => EditorEvent::BackTab,
            KeyCode::Enter => EditorEvent::Enter,
            KeyCode::Esc => EditorEvent::Escape,
            KeyCode::Backspace => EditorEvent::Backspace,
            KeyCode::Left => EditorEvent::Left,
            KeyCode::Right => EditorEvent::Right,
            KeyCode::Char(c) => EditorEvent::Char(c),
            _ => return Ok(Outcome::Stay),
        };
        self.dispatch(event, registry, config)
    }

    pub fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        registry: &mut Registry,
        config: &Config,
    ) -> Result<Outcome> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(Outcome::Stay);
        }
        let hit = self
            .cells
            .iter()
            .find(|(rect, _, _)| {
                mouse.column >= rect.x
                    && mouse.column < rect.x + rect.width
                    && mouse.row >= rect.y
                    && mouse.row < rect.y + rect.height
            })
            .copied();
        match hit {
            Some((_, row, field)) => {
                self.dispatch(EditorEvent::Select { row, field }, registry, config)
            }
            None => Ok(Outcome::Stay),
        }
    }

    fn dispatch(
        &mut self,
        event: EditorEvent,
        registry: &mut Registry,
        config: &Config,
    ) -> Result<Outcome> {
        match self.editor.handle(event, registry) {
            EditorReaction::Continue => Ok(Outcome::Stay),
            EditorReaction::Exit => Ok(Outcome::Navigate(ScreenId::MainMenu)),
            EditorReaction::Submit => {
                let path = submit_report(registry, config)?;
                Ok(Outcome::NavigateWithStatus(
                    ScreenId::MainMenu,
                    format!("TM30 REPORT SAVED: {}", path.display()),
                ))
            }
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme, clock: &Clock, registry: &Registry) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
                Constraint::Length(3),
            ])
            .split(area);

        draw_header(f, chunks[0], theme, clock, "TM30 FOREIGN GUEST REPORT", "TM3001");

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(Span::styled(" GUEST REPORTING DATA ", theme.label_style()));
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);

        self.cells.clear();
        let rows = registry.report_rows();
        if rows.is_empty() {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "NO GUESTS CURRENTLY CHECKED IN",
                    theme.status_style(),
                ))),
                inner,
            );
        } else {
            self.render_grid(f, inner, theme, registry);
        }

        let status = match self.editor.mode() {
            Mode::Editing => "EDITING FIELD - TAB=COMMIT+NEXT, ENTER=COMMIT, ESC=CANCEL",
            Mode::ConfirmingSubmission => "CONFIRM SUBMISSION",
            Mode::Browsing => {
                if !rows.is_empty() && self.editor.rows_complete(registry) {
                    "ALL RECORDS COMPLETE - PRESS ENTER TO SUBMIT"
                } else {
                    "SELECT A FIELD TO EDIT - PRESS ESC TO RETURN"
                }
            }
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(status, theme.status_style()))),
            chunks[2],
        );

        draw_function_keys(
            f,
            chunks[3],
            theme,
            &[
                "ESC=RETURN",
                "TAB=NEXT FIELD",
                "SHIFT+TAB=PREV FIELD",
                "ENTER=CONFIRM",
                "\u{2191}\u{2193}=NAVIGATE",
            ],
        );

        if self.editor.mode() == Mode::ConfirmingSubmission {
            self.render_confirmation(f, area, theme);
        }
    }

    fn render_grid(&mut self, f: &mut Frame, area: Rect, theme: &Theme, registry: &Registry) {
        let rows = registry.report_rows();

        // Header line, then one line per record.
        let mut constraints: Vec<Constraint> = Vec::with_capacity(FIELD_ORDER.len());
        for field in FIELD_ORDER {
            constraints.push(Constraint::Length(column_width(field) + 1));
        }

        let header_area = Rect { height: area.height.min(1), ..area };
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints.clone())
            .split(header_area);
        for (i, field) in FIELD_ORDER.iter().enumerate() {
            f.render_widget(
                Paragraph::new(Span::styled(field.label(), theme.title_style())),
                columns[i],
            );
        }

        let visible = area.height.saturating_sub(1) as usize;
        self.scroll_offset = scroll_to_selection(self.editor.selected_row(), self.scroll_offset, visible);

        for (line, (row_index, row)) in rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible)
            .enumerate()
        {
            let row_area = Rect {
                y: area.y + 1 + line as u16,
                height: 1,
                ..area
            };
            let row_selected = self.editor.selected_row() == Some(row_index);
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(constraints.clone())
                .split(row_area);

            for (i, field) in FIELD_ORDER.iter().enumerate() {
                let cell_area = columns[i];
                self.cells.push((cell_area, row_index, *field));

                let editing_here = row_selected && self.editor.current_field() == Some(*field);
                let (text, style) = if editing_here {
                    (self.editor.buffer().to_string(), theme.editing_style())
                } else {
                    let value = row.value(*field);
                    let display = if value.is_empty() { "-".to_string() } else { value.to_string() };
                    let style = if row_selected { theme.selected_style() } else { theme.value_style() };
                    (display, style)
                };
                f.render_widget(Paragraph::new(Span::styled(text, style)), cell_area);

                if editing_here {
                    let prefix = self.editor.buffer()[..self.editor.buffer_cursor()].chars().count() as u16;
                    let caret_x = (cell_area.x + prefix).min(cell_area.x + cell_area.width.saturating_sub(1));
                    f.set_cursor_position((caret_x, cell_area.y));
                }
            }
        }
    }

    fn render_confirmation(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let modal = centered_rect(50, 35, area);
        f.render_widget(Clear, modal);

        let choice_display = match self.editor.choice() {
            Choice::Yes => "Y",
            Choice::No => "N",
            Choice::Unset => "_",
        };
        let status = if self.editor.choice() == Choice::Unset {
            "ENTER Y FOR YES, N FOR NO"
        } else {
            "PRESS ENTER TO CONFIRM"
        };
        let lines = vec![
            Line::from(Span::styled("ALL RECORDS COMPLETE", theme.label_style())),
            Line::from(Span::styled("SUBMIT TM30 REPORT?", theme.title_style())),
            Line::raw(""),
            Line::from(vec![
                Span::styled("ENTER CHOICE (Y/N): ", theme.label_style()),
                Span::styled(choice_display, theme.editing_style()),
            ]),
            Line::raw(""),
            Line::from(Span::styled(status, theme.status_style())),
        ];
        let dialog = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(Span::styled(" SUBMIT ", theme.label_style())),
        );
        f.render_widget(dialog, modal);
    }
}

fn scroll_to_selection(selected: Option<usize>, offset: usize, visible: usize) -> usize {
    let Some(selected) = selected else { return offset };
    if visible == 0 {
        return offset;
    }
    if selected < offset {
        selected
    } else if selected >= offset + visible {
        selected + 1 - visible
    } else {
        offset
    }
}

/// Renders the confirmed report to a standalone HTML file and destroys the
/// row list. The file lands in the configured output directory, or next to
/// the store by default.
fn submit_report(registry: &mut Registry, config: &Config) -> Result<PathBuf> {
    let options = FormOptions { pad_to_min_rows: config.settings.pad_report_rows };
    let html = render_form(registry.report_rows(), &registry.bookings_by_id(), options);

    let output_dir = match &config.settings.report_output_dir {
        Some(dir) => dir.clone(),
        None => KvStore::default_path()?
            .parent()
            .map(PathBuf::from)
            .context("Store path has no parent directory")?,
    };
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create report directory: {:?}", output_dir))?;

    let filename = format!("TM30-{}.html", Local::now().format("%Y%m%d-%H%M%S"));
    let path = output_dir.join(filename);
    fs::write(&path, html).with_context(|| format!("Failed to write report: {:?}", path))?;
    info!("Wrote TM30 report to {:?}", path);

    registry.clear_report_rows()?;
    Ok(path)
}
