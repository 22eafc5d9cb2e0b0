//! The report grid editor.
//!
//! Owns cursor, edit buffer, and the submission confirmation overlay,
//! nothing else. Row data always lives with the host: the editor reads
//! committed values and writes edits back through [`RowHost`], so there is
//! never a second copy of the grid to drift out of sync.

use crate::model::report::{Field, FIELD_ORDER};

/// Host-side view of the report grid. Implemented by the registry; tests
/// implement it with an in-memory double.
pub trait RowHost {
    fn row_count(&self) -> usize;
    /// Committed value of one cell.
    fn field_value(&self, row: usize, field: Field) -> String;
    /// Commits an edited value into one cell.
    fn commit(&mut self, row: usize, field: Field, value: String);
}

/// What the caller must do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorReaction {
    /// Nothing beyond re-rendering.
    Continue,
    /// The operator left the grid; return control to the caller.
    Exit,
    /// The confirmed report must be submitted. Emitted at most once per
    /// confirmation; the grid session is over.
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Editing,
    ConfirmingSubmission,
}

/// Yes/no state of the submission overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Choice {
    Yes,
    No,
    #[default]
    Unset,
}

/// Grid-level input events, already decoded from raw key/mouse input by the
/// screen layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    Up,
    Down,
    Tab,
    BackTab,
    Enter,
    Escape,
    /// Pointer click on a cell.
    Select { row: usize, field: Field },
    Char(char),
    Backspace,
    Left,
    Right,
}

#[derive(Debug, Default)]
pub struct ReportEditor {
    selected_row: Option<usize>,
    current_field: Option<Field>,
    buffer: String,
    /// Byte offset of the caret within `buffer`, always on a char boundary.
    cursor: usize,
    confirm_visible: bool,
    choice: Choice,
}

impl ReportEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        if self.confirm_visible {
            Mode::ConfirmingSubmission
        } else if self.current_field.is_some() {
            Mode::Editing
        } else {
            Mode::Browsing
        }
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }

    pub fn current_field(&self) -> Option<Field> {
        self.current_field
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn buffer_cursor(&self) -> usize {
        self.cursor
    }

    pub fn choice(&self) -> Choice {
        self.choice
    }

    /// Every editable cell of every row holds non-whitespace content. The
    /// submission overlay is only reachable while this holds.
    pub fn rows_complete(&self, host: &impl RowHost) -> bool {
        (0..host.row_count()).all(|row| {
            FIELD_ORDER
                .iter()
                .filter(|f| f.is_editable())
                .all(|f| !host.field_value(row, *f).trim().is_empty())
        })
    }

    /// Feeds one event through the state machine. Never fails: out-of-range
    /// navigation and edits of read-only cells are no-ops.
    pub fn handle(&mut self, event: EditorEvent, host: &mut impl RowHost) -> EditorReaction {
        match self.mode() {
            Mode::ConfirmingSubmission => self.handle_confirming(event),
            Mode::Editing => self.handle_editing(event, host),
            Mode::Browsing => self.handle_browsing(event, host),
        }
    }

    fn handle_browsing(&mut self, event: EditorEvent, host: &mut impl RowHost) -> EditorReaction {
        match event {
            EditorEvent::Up => {
                if let Some(row) = self.selected_row {
                    if row > 0 {
                        self.selected_row = Some(row - 1);
                    }
                }
            }
            EditorEvent::Down => match self.selected_row {
                None if host.row_count() > 0 => self.selected_row = Some(0),
                Some(row) if row + 1 < host.row_count() => self.selected_row = Some(row + 1),
                _ => {}
            },
            EditorEvent::Tab => {
                if host.row_count() > 0 {
                    self.open_field(0, Field::first_editable(), host);
                }
            }
            EditorEvent::BackTab => {
                if host.row_count() > 0 {
                    self.open_field(host.row_count() - 1, Field::last_editable(), host);
                }
            }
            EditorEvent::Enter => {
                if host.row_count() > 0 && self.rows_complete(host) {
                    self.confirm_visible = true;
                    self.choice = Choice::Unset;
                }
            }
            EditorEvent::Escape => return EditorReaction::Exit,
            EditorEvent::Select { row, field } => self.open_field(row, field, host),
            _ => {}
        }
        EditorReaction::Continue
    }

    fn handle_editing(&mut self, event: EditorEvent, host: &mut impl RowHost) -> EditorReaction {
        match event {
            EditorEvent::Char(c) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            EditorEvent::Backspace => {
                if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
                    self.cursor -= c.len_utf8();
                    self.buffer.remove(self.cursor);
                }
            }
            EditorEvent::Left => {
                if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
                    self.cursor -= c.len_utf8();
                }
            }
            EditorEvent::Right => {
                if let Some(c) = self.buffer[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
            }
            EditorEvent::Tab | EditorEvent::Enter => {
                self.commit_current(host);
                self.advance_forward(host);
            }
            EditorEvent::BackTab => {
                self.commit_current(host);
                self.advance_backward(host);
            }
            EditorEvent::Escape => {
                // Discard the open field without committing.
                self.close_cursor();
            }
            EditorEvent::Select { row, field } => {
                // Switching cells drops the uncommitted buffer of the
                // previous field.
                self.open_field(row, field, host);
            }
            // Row navigation is suspended while a field is open.
            EditorEvent::Up | EditorEvent::Down => {}
        }
        EditorReaction::Continue
    }

    fn handle_confirming(&mut self, event: EditorEvent) -> EditorReaction {
        match event {
            EditorEvent::Char(c) if c.eq_ignore_ascii_case(&'y') => self.choice = Choice::Yes,
            EditorEvent::Char(c) if c.eq_ignore_ascii_case(&'n') => self.choice = Choice::No,
            EditorEvent::Enter => match self.choice {
                Choice::Yes => {
                    self.confirm_visible = false;
                    self.choice = Choice::Unset;
                    self.close_cursor();
                    return EditorReaction::Submit;
                }
                Choice::No => {
                    self.confirm_visible = false;
                    self.choice = Choice::Unset;
                }
                Choice::Unset => {}
            },
            EditorEvent::Escape => {
                self.confirm_visible = false;
                self.choice = Choice::Unset;
            }
            _ => {}
        }
        EditorReaction::Continue
    }

    /// Selects `(row, field)` and, when the field is editable, opens it with
    /// the committed value loaded into the buffer. The booking column only
    /// ever becomes a selection target.
    fn open_field(&mut self, row: usize, field: Field, host: &impl RowHost) {
        if row >= host.row_count() {
            return;
        }
        self.selected_row = Some(row);
        if field.is_editable() {
            self.current_field = Some(field);
            self.buffer = host.field_value(row, field);
            self.cursor = self.buffer.len();
        } else {
            self.current_field = None;
            self.buffer.clear();
            self.cursor = 0;
        }
    }

    fn commit_current(&mut self, host: &mut impl RowHost) {
        if let (Some(row), Some(field)) = (self.selected_row, self.current_field) {
            host.commit(row, field, self.buffer.clone());
        }
    }

    fn advance_forward(&mut self, host: &impl RowHost) {
        let (Some(row), Some(field)) = (self.selected_row, self.current_field) else {
            return;
        };
        if let Some(next) = field.next_editable() {
            self.open_field(row, next, host);
        } else if row + 1 < host.row_count() {
            self.open_field(row + 1, Field::first_editable(), host);
        } else {
            // Last field of the last row: the grid pass is over.
            self.close_cursor();
        }
    }

    fn advance_backward(&mut self, host: &impl RowHost) {
        let (Some(row), Some(field)) = (self.selected_row, self.current_field) else {
            return;
        };
        if let Some(prev) = field.prev_editable() {
            self.open_field(row, prev, host);
        } else if row > 0 {
            self.open_field(row - 1, Field::last_editable(), host);
        } else {
            // First field of the first row: stay put, reload the committed
            // value.
            self.open_field(row, field, host);
        }
    }

    fn close_cursor(&mut self) {
        self.selected_row = None;
        self.current_field = None;
        self.buffer.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::report::ReportRow;

    #[derive(Default)]
    struct GridHost {
        rows: Vec<ReportRow>,
        commits: usize,
    }

    impl GridHost {
        fn with_rows(count: usize) -> Self {
            let rows = (0..count)
                .map(|i| ReportRow {
                    booking_id: format!("BK-10000{}", i),
                    name_and_surname: format!("GUEST {}", i),
                    ..Default::default()
                })
                .collect();
            Self { rows, commits: 0 }
        }

        fn filled(count: usize) -> Self {
            let mut host = Self::with_rows(count);
            for row in &mut host.rows {
                for field in FIELD_ORDER.iter().filter(|f| f.is_editable()) {
                    row.set_value(*field, "FILLED".into());
                }
            }
            host
        }
    }

    impl RowHost for GridHost {
        fn row_count(&self) -> usize {
            self.rows.len()
        }

        fn field_value(&self, row: usize, field: Field) -> String {
            self.rows[row].value(field).to_string()
        }

        fn commit(&mut self, row: usize, field: Field, value: String) {
            self.rows[row].set_value(field, value);
            self.commits += 1;
        }
    }

    fn type_text(editor: &mut ReportEditor, host: &mut GridHost, text: &str) {
        for c in text.chars() {
            editor.handle(EditorEvent::Char(c), host);
        }
    }

    #[test]
    fn test_first_tab_opens_first_editable_field() {
        let mut host = GridHost::with_rows(1);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Tab, &mut host);
        assert_eq!(editor.mode(), Mode::Editing);
        assert_eq!(editor.selected_row(), Some(0));
        assert_eq!(editor.current_field(), Some(Field::NameAndSurname));
        assert_eq!(editor.buffer(), "GUEST 0");
    }

    #[test]
    fn test_tab_on_empty_grid_is_noop() {
        let mut host = GridHost::with_rows(0);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Tab, &mut host);
        assert_eq!(editor.mode(), Mode::Browsing);
        assert_eq!(editor.selected_row(), None);
    }

    #[test]
    fn test_tab_commits_and_wraps_across_rows() {
        let mut host = GridHost::with_rows(2);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Tab, &mut host);

        // Walk through every editable field of row 0.
        let editable = FIELD_ORDER.iter().filter(|f| f.is_editable()).count();
        for _ in 0..editable {
            editor.handle(EditorEvent::Tab, &mut host);
        }
        assert_eq!(editor.selected_row(), Some(1));
        assert_eq!(editor.current_field(), Some(Field::NameAndSurname));
        assert_eq!(host.commits, editable);
    }

    #[test]
    fn test_tab_at_end_of_grid_commits_then_closes() {
        let mut host = GridHost::with_rows(1);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::BackTab, &mut host);
        assert_eq!(editor.current_field(), Some(Field::Relationship));

        type_text(&mut editor, &mut host, "PRIMARY");
        editor.handle(EditorEvent::Tab, &mut host);
        assert_eq!(editor.mode(), Mode::Browsing);
        assert_eq!(editor.selected_row(), None);
        assert_eq!(host.rows[0].relationship, "PRIMARY");
    }

    #[test]
    fn test_backtab_at_start_of_grid_stays() {
        let mut host = GridHost::with_rows(2);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Tab, &mut host);
        editor.handle(EditorEvent::BackTab, &mut host);
        assert_eq!(editor.mode(), Mode::Editing);
        assert_eq!(editor.selected_row(), Some(0));
        assert_eq!(editor.current_field(), Some(Field::NameAndSurname));
    }

    #[test]
    fn test_backtab_from_browsing_opens_last_field_of_last_row() {
        let mut host = GridHost::with_rows(3);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::BackTab, &mut host);
        assert_eq!(editor.selected_row(), Some(2));
        assert_eq!(editor.current_field(), Some(Field::Relationship));
    }

    #[test]
    fn test_arrow_navigation_clamps() {
        let mut host = GridHost::with_rows(2);
        let mut editor = ReportEditor::new();

        // No selection: Up stays unselected, Down selects the first row.
        editor.handle(EditorEvent::Up, &mut host);
        assert_eq!(editor.selected_row(), None);
        editor.handle(EditorEvent::Down, &mut host);
        assert_eq!(editor.selected_row(), Some(0));

        editor.handle(EditorEvent::Down, &mut host);
        editor.handle(EditorEvent::Down, &mut host);
        assert_eq!(editor.selected_row(), Some(1));
        editor.handle(EditorEvent::Up, &mut host);
        editor.handle(EditorEvent::Up, &mut host);
        editor.handle(EditorEvent::Up, &mut host);
        assert_eq!(editor.selected_row(), Some(0));
    }

    #[test]
    fn test_arrows_ignored_while_editing() {
        let mut host = GridHost::with_rows(2);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Tab, &mut host);
        editor.handle(EditorEvent::Down, &mut host);
        assert_eq!(editor.selected_row(), Some(0));
        assert_eq!(editor.mode(), Mode::Editing);
    }

    #[test]
    fn test_select_booking_cell_selects_row_without_editing() {
        let mut host = GridHost::with_rows(2);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Select { row: 1, field: Field::BookingId }, &mut host);
        assert_eq!(editor.selected_row(), Some(1));
        assert_eq!(editor.mode(), Mode::Browsing);
        assert_eq!(editor.current_field(), None);
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let mut host = GridHost::with_rows(1);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Select { row: 5, field: Field::Nationality }, &mut host);
        assert_eq!(editor.selected_row(), None);
        assert_eq!(editor.mode(), Mode::Browsing);
    }

    #[test]
    fn test_select_switch_discards_uncommitted_buffer() {
        let mut host = GridHost::with_rows(1);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Tab, &mut host);
        type_text(&mut editor, &mut host, " EDITED");
        editor.handle(EditorEvent::Select { row: 0, field: Field::Nationality }, &mut host);
        // The abandoned field keeps its committed value.
        assert_eq!(host.rows[0].name_and_surname, "GUEST 0");
        assert_eq!(editor.current_field(), Some(Field::Nationality));
        assert_eq!(editor.buffer(), "");
    }

    #[test]
    fn test_escape_discards_edit_without_commit() {
        let mut host = GridHost::with_rows(1);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Tab, &mut host);
        type_text(&mut editor, &mut host, "XYZ");
        editor.handle(EditorEvent::Escape, &mut host);
        assert_eq!(editor.mode(), Mode::Browsing);
        assert_eq!(editor.selected_row(), None);
        assert_eq!(host.rows[0].name_and_surname, "GUEST 0");
        assert_eq!(host.commits, 0);
    }

    #[test]
    fn test_escape_in_browsing_exits() {
        let mut host = GridHost::with_rows(1);
        let mut editor = ReportEditor::new();
        assert_eq!(editor.handle(EditorEvent::Escape, &mut host), EditorReaction::Exit);
    }

    #[test]
    fn test_buffer_editing_respects_char_boundaries() {
        let mut host = GridHost::with_rows(1);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Select { row: 0, field: Field::Nationality }, &mut host);
        type_text(&mut editor, &mut host, "NORSKÆ");
        editor.handle(EditorEvent::Backspace, &mut host);
        assert_eq!(editor.buffer(), "NORSK");
        editor.handle(EditorEvent::Left, &mut host);
        editor.handle(EditorEvent::Left, &mut host);
        editor.handle(EditorEvent::Char('-'), &mut host);
        assert_eq!(editor.buffer(), "NOR-SK");
    }

    #[test]
    fn test_enter_gated_on_completeness() {
        let mut host = GridHost::with_rows(1);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Enter, &mut host);
        assert_eq!(editor.mode(), Mode::Browsing);

        let mut filled = GridHost::filled(1);
        editor.handle(EditorEvent::Enter, &mut filled);
        assert_eq!(editor.mode(), Mode::ConfirmingSubmission);
        assert_eq!(editor.choice(), Choice::Unset);
    }

    #[test]
    fn test_enter_on_empty_grid_does_not_confirm() {
        let mut host = GridHost::with_rows(0);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Enter, &mut host);
        assert_eq!(editor.mode(), Mode::Browsing);
    }

    #[test]
    fn test_confirmation_choice_resets_on_entry_and_escape() {
        let mut host = GridHost::filled(1);
        let mut editor = ReportEditor::new();

        editor.handle(EditorEvent::Enter, &mut host);
        editor.handle(EditorEvent::Char('Y'), &mut host);
        assert_eq!(editor.choice(), Choice::Yes);
        editor.handle(EditorEvent::Escape, &mut host);
        assert_eq!(editor.mode(), Mode::Browsing);
        assert_eq!(editor.choice(), Choice::Unset);
        assert_eq!(host.commits, 0);

        // Re-entering starts from Unset again.
        editor.handle(EditorEvent::Enter, &mut host);
        assert_eq!(editor.choice(), Choice::Unset);
    }

    #[test]
    fn test_confirmation_enter_without_choice_is_noop() {
        let mut host = GridHost::filled(1);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Enter, &mut host);
        let reaction = editor.handle(EditorEvent::Enter, &mut host);
        assert_eq!(reaction, EditorReaction::Continue);
        assert_eq!(editor.mode(), Mode::ConfirmingSubmission);
    }

    #[test]
    fn test_confirmation_no_returns_to_browsing() {
        let mut host = GridHost::filled(1);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Enter, &mut host);
        editor.handle(EditorEvent::Char('n'), &mut host);
        let reaction = editor.handle(EditorEvent::Enter, &mut host);
        assert_eq!(reaction, EditorReaction::Continue);
        assert_eq!(editor.mode(), Mode::Browsing);
        assert_eq!(editor.choice(), Choice::Unset);
    }

    #[test]
    fn test_confirmation_yes_submits() {
        let mut host = GridHost::filled(2);
        let mut editor = ReportEditor::new();
        editor.handle(EditorEvent::Enter, &mut host);
        editor.handle(EditorEvent::Char('y'), &mut host);
        let reaction = editor.handle(EditorEvent::Enter, &mut host);
        assert_eq!(reaction, EditorReaction::Submit);
        assert_eq!(editor.mode(), Mode::Browsing);
    }
}
