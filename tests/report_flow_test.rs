use chrono::NaiveDate;
use tempfile::TempDir;

use guesthouse_cli::model::guest::{
    Booking, BookingStatus, Guest, Identification, IdentificationKind, PartySize,
};
use guesthouse_cli::model::report::{Field, FIELD_ORDER};
use guesthouse_cli::registry::Registry;
use guesthouse_cli::report::editor::{EditorEvent, EditorReaction, Mode, ReportEditor};
use guesthouse_cli::report::form::{render_form, FormOptions};
use guesthouse_cli::store::KvStore;

fn registry_in(dir: &TempDir) -> Registry {
    Registry::load(KvStore::open(dir.path().join("store.json")))
}

/// Checks in a fully-documented guest travelling with one child.
fn check_in_family(registry: &mut Registry) {
    let mut guest = Guest::new("ANNA".into(), "KOWALSKA".into());
    guest.nationality = "POLISH".into();
    guest.identification = Some(Identification {
        kind: IdentificationKind::Passport,
        number: "PL4455667".into(),
        issuing_country: "POLAND".into(),
        expiration_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
    });
    let check_in = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
    let mut booking = Booking::new(check_in, 3, PartySize { adults: 1, children: 1 });
    booking.status = BookingStatus::CheckedIn;
    guest.bookings.push(booking);
    registry.check_in(guest).unwrap();
}

fn type_text(editor: &mut ReportEditor, registry: &mut Registry, text: &str) {
    for c in text.chars() {
        editor.handle(EditorEvent::Char(c), registry);
    }
}

/// Clears the open buffer, types a replacement, and commits with Tab.
fn replace_and_tab(editor: &mut ReportEditor, registry: &mut Registry, text: &str) {
    while !editor.buffer().is_empty() {
        editor.handle(EditorEvent::Backspace, registry);
    }
    type_text(editor, registry, text);
    editor.handle(EditorEvent::Tab, registry);
}

#[test]
fn test_tab_driven_completion_gates_and_submits_once() {
    let dir = TempDir::new().unwrap();
    let mut registry = registry_in(&dir);
    check_in_family(&mut registry);
    registry.ensure_report_rows().unwrap();

    // PRIMARY row plus one CHILD placeholder.
    assert_eq!(registry.report_rows().len(), 2);
    assert_eq!(registry.report_rows()[0].relationship, "PRIMARY");
    assert_eq!(registry.report_rows()[1].name_and_surname, "CHILD 1");

    let mut editor = ReportEditor::new();

    // Several fields are still blank, so submission is unreachable.
    assert!(!editor.rows_complete(&registry));
    editor.handle(EditorEvent::Enter, &mut registry);
    assert_eq!(editor.mode(), Mode::Browsing);

    // First Tab lands on the name of row 0, never the booking column.
    editor.handle(EditorEvent::Tab, &mut registry);
    assert_eq!(editor.selected_row(), Some(0));
    assert_eq!(editor.current_field(), Some(Field::NameAndSurname));
    assert_eq!(editor.buffer(), "ANNA KOWALSKA");

    // Walk the whole grid, filling every blank cell along the way.
    let fills = [
        "TOURIST",
        "2024-01-30",
        "2024-02-29",
        "SUVARNABHUMI",
        "SMITH JUNIOR",
        "POLISH",
        "PL9988776",
        "TOURIST",
        "2024-01-30",
        "2024-02-29",
        "SUVARNABHUMI",
    ];
    let mut fill = fills.iter();
    loop {
        if editor.mode() != Mode::Editing {
            break;
        }
        // Blank cells and the derived child placeholder both need real data.
        let needs_data = editor.buffer().trim().is_empty() || editor.buffer() == "CHILD 1";
        if needs_data {
            replace_and_tab(&mut editor, &mut registry, fill.next().expect("enough fill values"));
        } else {
            editor.handle(EditorEvent::Tab, &mut registry);
        }
    }
    // The final Tab of the last row closed the cursor.
    assert_eq!(editor.mode(), Mode::Browsing);
    assert_eq!(editor.selected_row(), None);
    assert!(fill.next().is_none(), "every placeholder cell was visited");

    // Committed edits are already persisted: a fresh load sees them.
    let reloaded = registry_in(&dir);
    assert_eq!(reloaded.report_rows()[1].name_and_surname, "SMITH JUNIOR");
    assert_eq!(reloaded.report_rows()[1].passport_number, "PL9988776");

    // Completeness now holds; Enter opens the confirmation with no choice.
    assert!(editor.rows_complete(&registry));
    editor.handle(EditorEvent::Enter, &mut registry);
    assert_eq!(editor.mode(), Mode::ConfirmingSubmission);

    // Unset choice: Enter does nothing.
    assert_eq!(editor.handle(EditorEvent::Enter, &mut registry), EditorReaction::Continue);

    editor.handle(EditorEvent::Char('y'), &mut registry);
    let mut submissions = 0;
    if editor.handle(EditorEvent::Enter, &mut registry) == EditorReaction::Submit {
        submissions += 1;
    }
    assert_eq!(submissions, 1);

    // Host side of submission: render the form, then destroy the grid.
    let html = render_form(
        registry.report_rows(),
        &registry.bookings_by_id(),
        FormOptions::default(),
    );
    assert!(html.contains("ANNA KOWALSKA"));
    assert!(html.contains("SMITH JUNIOR"));
    // Stay period computed from the booking: 2024-01-30 + 3 nights.
    assert!(html.contains("2024-01-30 - 2024-02-02"));

    registry.clear_report_rows().unwrap();
    assert!(registry.report_rows().is_empty());
    assert!(registry_in(&dir).report_rows().is_empty());
}

#[test]
fn test_escape_cancellation_keeps_committed_rows() {
    let dir = TempDir::new().unwrap();
    let mut registry = registry_in(&dir);
    check_in_family(&mut registry);
    registry.ensure_report_rows().unwrap();

    let mut editor = ReportEditor::new();
    editor.handle(EditorEvent::Tab, &mut registry);
    replace_and_tab(&mut editor, &mut registry, "EDITED NAME");

    // Abandon the grid mid-edit; the commit already made is not rolled back.
    type_text(&mut editor, &mut registry, "UNCOMMITTED");
    editor.handle(EditorEvent::Escape, &mut registry);
    assert_eq!(editor.handle(EditorEvent::Escape, &mut registry), EditorReaction::Exit);

    let reloaded = registry_in(&dir);
    assert_eq!(reloaded.report_rows()[0].name_and_surname, "EDITED NAME");
    assert_ne!(reloaded.report_rows()[0].nationality, "UNCOMMITTED");

    // Re-entering does not re-derive over the in-flight grid.
    let mut registry = registry_in(&dir);
    registry.ensure_report_rows().unwrap();
    assert_eq!(registry.report_rows()[0].name_and_surname, "EDITED NAME");
}

#[test]
fn test_every_grid_column_is_reachable_by_tab() {
    let dir = TempDir::new().unwrap();
    let mut registry = registry_in(&dir);
    check_in_family(&mut registry);
    registry.ensure_report_rows().unwrap();

    let mut editor = ReportEditor::new();
    editor.handle(EditorEvent::Tab, &mut registry);

    let mut visited = Vec::new();
    while editor.mode() == Mode::Editing {
        visited.push((editor.selected_row().unwrap(), editor.current_field().unwrap()));
        editor.handle(EditorEvent::Tab, &mut registry);
    }

    let editable_per_row = FIELD_ORDER.iter().filter(|f| f.is_editable()).count();
    assert_eq!(visited.len(), editable_per_row * registry.report_rows().len());
    assert!(visited.iter().all(|(_, field)| *field != Field::BookingId));
}
