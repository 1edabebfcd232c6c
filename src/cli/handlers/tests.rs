use super::calendar::calendar_state;
use super::list::list_view;
use super::*;
use crate::ai::{AiError, EnhanceMode, TextEnhancer};
use crate::cli::output::OutputFormat;
use crate::cli::{CalendarArgs, EditArgs, EnhanceArgs, ListArgs, RemoveArgs};
use crate::domain::{DEFAULT_NOTE_CONTENT, Note, NoteId};
use crate::store::{MemoryBackend, NoteRepository, SlotStore};
use crate::view::{CalendarMonth, EnhanceOutcome, SortOrder};
use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::path::Path;

// Test helpers
fn at(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

fn test_datetime() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn sample_note(id: &str, content: &str, created: DateTime<Utc>, updated: DateTime<Utc>) -> Note {
    let id: NoteId = id.parse().unwrap();
    Note::new(id, "", content, created, created)
        .unwrap()
        .saved(updated)
}

fn store_with(notes: Vec<Note>) -> SlotStore<MemoryBackend> {
    let mut store = SlotStore::new(MemoryBackend::new());
    // upsert prepends, so insert in reverse to keep the given order
    for note in notes.into_iter().rev() {
        store.upsert(note).unwrap();
    }
    store
}

fn three_notes() -> SlotStore<MemoryBackend> {
    store_with(vec![
        sample_note(
            "01HQ3K5M7NXJK4QZPW8V2R6T9C",
            "# Groceries\nmilk, eggs",
            at(3_000),
            at(3_000),
        ),
        sample_note(
            "01HQ3K5M7NXJK4QZPW8V2R6T9B",
            "# Standup\nsay hello world",
            at(2_000),
            at(9_000),
        ),
        sample_note("01HQ4AAAAAAAAAAAAAAAAAAAAA", "# Ideas\nrust", at(1_000), at(1_000)),
    ])
}

fn list_args(search: Option<&str>, sort: SortOrder) -> ListArgs {
    ListArgs {
        search: search.map(str::to_string),
        sort,
        format: OutputFormat::Human,
    }
}

fn titles(notes: &[&Note]) -> Vec<String> {
    notes.iter().map(|n| n.title().to_string()).collect()
}

// ===========================================
// list tests
// ===========================================

#[test]
fn list_view_keeps_store_order_by_default() {
    let store = three_notes();
    let notes = store.list_all();
    let shown = list_view(&notes, &list_args(None, SortOrder::Stored));
    assert_eq!(titles(&shown), vec!["Groceries", "Standup", "Ideas"]);
}

#[test]
fn list_view_filters_case_insensitively() {
    let store = three_notes();
    let notes = store.list_all();
    let shown = list_view(&notes, &list_args(Some("HELLO"), SortOrder::Stored));
    assert_eq!(titles(&shown), vec!["Standup"]);
}

#[test]
fn list_view_sorts_by_updated() {
    let store = three_notes();
    let notes = store.list_all();
    let shown = list_view(&notes, &list_args(None, SortOrder::Updated));
    assert_eq!(titles(&shown), vec!["Standup", "Groceries", "Ideas"]);
}

#[test]
fn handle_list_succeeds_for_every_format() {
    let store = three_notes();
    for format in [OutputFormat::Human, OutputFormat::Json, OutputFormat::Ids] {
        let args = ListArgs {
            format,
            ..list_args(Some("e"), SortOrder::Created)
        };
        handle_list(&args, &store).unwrap();
    }
}

// ===========================================
// resolve tests
// ===========================================

#[test]
fn resolve_exact_id() {
    let store = three_notes();
    match resolve_note(&store, "01HQ3K5M7NXJK4QZPW8V2R6T9B") {
        ResolveResult::Unique(note) => assert_eq!(note.title(), "Standup"),
        other => panic!("expected unique match, got {other:?}"),
    }
}

#[test]
fn resolve_unique_prefix_ignores_case() {
    let store = three_notes();
    match resolve_note(&store, "01hq4") {
        ResolveResult::Unique(note) => assert_eq!(note.title(), "Ideas"),
        other => panic!("expected unique match, got {other:?}"),
    }
}

#[test]
fn resolve_shared_prefix_is_ambiguous() {
    let store = three_notes();
    match resolve_note(&store, "01HQ3K") {
        ResolveResult::Ambiguous(notes) => assert_eq!(notes.len(), 2),
        other => panic!("expected ambiguous match, got {other:?}"),
    }
}

#[test]
fn resolve_unknown_or_blank_is_not_found() {
    let store = three_notes();
    assert!(matches!(resolve_note(&store, "zzz"), ResolveResult::NotFound));
    assert!(matches!(resolve_note(&store, "  "), ResolveResult::NotFound));
}

#[test]
fn resolve_exact_short_id_wins_over_prefix() {
    let store = store_with(vec![
        sample_note("abc", "# Short", at(1), at(1)),
        sample_note("abcdef", "# Long", at(2), at(2)),
    ]);
    match resolve_note(&store, "abc") {
        ResolveResult::Unique(note) => assert_eq!(note.title(), "Short"),
        other => panic!("expected unique match, got {other:?}"),
    }
}

// ===========================================
// new tests
// ===========================================

/// Mock editor for testing.
struct MockEditor {
    opened: RefCell<Option<String>>,
    replacement: Option<String>,
    should_fail: bool,
}

impl MockEditor {
    fn new() -> Self {
        Self {
            opened: RefCell::new(None),
            replacement: None,
            should_fail: false,
        }
    }

    fn writing(content: &str) -> Self {
        Self {
            replacement: Some(content.to_string()),
            ..Self::new()
        }
    }

    fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// Content the editor saw when it was opened.
    fn seen(&self) -> Option<String> {
        self.opened.borrow().clone()
    }
}

impl EditorLauncher for MockEditor {
    fn open(&self, path: &Path) -> Result<()> {
        *self.opened.borrow_mut() = Some(std::fs::read_to_string(path)?);
        if self.should_fail {
            bail!("editor failed to open");
        }
        if let Some(content) = &self.replacement {
            std::fs::write(path, content)?;
        }
        Ok(())
    }
}

#[test]
fn create_note_with_default_content() {
    let mut store = store_with(vec![]);
    let note = create_note(&mut store, None, None::<&MockEditor>, test_datetime()).unwrap();

    assert_eq!(note.content(), DEFAULT_NOTE_CONTENT);
    assert_eq!(note.title(), "New Note");
    assert_eq!(note.created(), test_datetime());
    assert_eq!(store.list_all(), vec![note]);
}

#[test]
fn create_note_with_message_derives_title() {
    let mut store = store_with(vec![]);
    let note = create_note(
        &mut store,
        Some("# My Title\nBody text".to_string()),
        None::<&MockEditor>,
        test_datetime(),
    )
    .unwrap();
    assert_eq!(note.title(), "My Title");
}

#[test]
fn create_note_through_editor() {
    let mut store = store_with(vec![]);
    let editor = MockEditor::writing("# Edited\nfrom the editor");
    let note = create_note(&mut store, None, Some(&editor), test_datetime()).unwrap();

    assert_eq!(editor.seen().as_deref(), Some(DEFAULT_NOTE_CONTENT));
    assert_eq!(note.title(), "Edited");
    assert_eq!(store.list_all().len(), 1);
}

#[test]
fn create_note_editor_failure_saves_nothing() {
    let mut store = store_with(vec![]);
    let result = create_note(&mut store, None, Some(&MockEditor::failing()), test_datetime());
    assert!(result.is_err());
    assert!(store.list_all().is_empty());
}

#[test]
fn create_note_reports_write_failure() {
    let mut store = store_with(vec![]);
    store.backend().set_fail_writes(true);
    let err = create_note(&mut store, None, None::<&MockEditor>, test_datetime()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to save new note"));
}

// ===========================================
// edit tests
// ===========================================

fn edit_args(note: &str) -> EditArgs {
    EditArgs {
        note: note.to_string(),
    }
}

#[test]
fn handle_edit_not_found_returns_error() {
    let mut store = three_notes();
    let result = handle_edit_impl(&edit_args("nonexistent"), &mut store, &MockEditor::new(), at(10_000));
    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[test]
fn handle_edit_ambiguous_returns_error() {
    let mut store = three_notes();
    let result = handle_edit_impl(&edit_args("01HQ3K"), &mut store, &MockEditor::new(), at(10_000));
    assert!(result.unwrap_err().to_string().contains("ambiguous"));
}

#[test]
fn handle_edit_saves_editor_content() {
    let mut store = three_notes();
    let editor = MockEditor::writing("# Renamed\nnew body");

    let note = handle_edit_impl(&edit_args("01HQ4"), &mut store, &editor, at(10_000)).unwrap();

    assert_eq!(editor.seen().as_deref(), Some("# Ideas\nrust"));
    assert_eq!(note.title(), "Renamed");
    assert_eq!(note.updated(), at(10_000));
    assert_eq!(note.created(), at(1_000));

    let stored = store.find(note.id()).unwrap();
    assert_eq!(stored, note);
    assert_eq!(store.list_all().len(), 3);
}

#[test]
fn handle_edit_failure_leaves_note_untouched() {
    let mut store = three_notes();
    let before = store.list_all();
    let result = handle_edit_impl(&edit_args("01HQ4"), &mut store, &MockEditor::failing(), at(10_000));
    assert!(result.is_err());
    assert_eq!(store.list_all(), before);
}

#[test]
fn handle_edit_new_creates_note() {
    let mut store = three_notes();
    let editor = MockEditor::writing("# Fresh");

    let note = handle_edit_impl(&edit_args("new"), &mut store, &editor, at(10_000)).unwrap();

    assert_eq!(note.title(), "Fresh");
    let all = store.list_all();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].id(), note.id());
}

// ===========================================
// remove tests
// ===========================================

fn remove_args(note: &str) -> RemoveArgs {
    RemoveArgs {
        note: note.to_string(),
        yes: false,
    }
}

#[test]
fn remove_confirmed_deletes_note() {
    let mut store = three_notes();
    let deleted = handle_remove_impl(&remove_args("01HQ4"), &mut store, &mut |_: &str| true).unwrap();
    assert!(deleted);
    assert_eq!(store.list_all().len(), 2);
    assert!(matches!(resolve_note(&store, "01HQ4"), ResolveResult::NotFound));
}

#[test]
fn remove_declined_keeps_note() {
    let mut store = three_notes();
    let deleted =
        handle_remove_impl(&remove_args("01HQ4"), &mut store, &mut |_: &str| false).unwrap();
    assert!(!deleted);
    assert_eq!(store.list_all().len(), 3);
}

#[test]
fn remove_unknown_note_is_an_error() {
    let mut store = three_notes();
    let result = handle_remove_impl(&remove_args("missing"), &mut store, &mut |_: &str| true);
    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[test]
fn remove_write_failure_is_an_error() {
    let mut store = three_notes();
    store.backend().set_fail_writes(true);
    let result = handle_remove_impl(&remove_args("01HQ4"), &mut store, &mut |_: &str| true);
    assert!(result.is_err());
}

// ===========================================
// enhance tests
// ===========================================

struct FixedEnhancer(Option<&'static str>);

#[async_trait]
impl TextEnhancer for FixedEnhancer {
    async fn enhance(&self, _text: &str, _mode: EnhanceMode) -> Result<String, AiError> {
        self.0.map(str::to_string).ok_or(AiError::MissingCredential)
    }
}

fn enhance_args(mode: EnhanceMode, dry_run: bool) -> EnhanceArgs {
    EnhanceArgs {
        note: "01HQ4".to_string(),
        mode,
        dry_run,
    }
}

#[test]
fn enhance_fix_grammar_saves_replacement() {
    let mut store = three_notes();
    let report = handle_enhance_impl(
        &enhance_args(EnhanceMode::FixGrammar, false),
        &mut store,
        &FixedEnhancer(Some("# Ideas\nRust.")),
        at(20_000),
    )
    .unwrap();

    assert_eq!(report.outcome, EnhanceOutcome::Replaced);
    assert!(report.saved);
    let stored = store.find(report.note.id()).unwrap();
    assert_eq!(stored.content(), "# Ideas\nRust.");
    assert_eq!(stored.updated(), at(20_000));
}

#[test]
fn enhance_dry_run_does_not_save() {
    let mut store = three_notes();
    let report = handle_enhance_impl(
        &enhance_args(EnhanceMode::ContinueWriting, true),
        &mut store,
        &FixedEnhancer(Some("more")),
        at(20_000),
    )
    .unwrap();

    assert_eq!(report.outcome, EnhanceOutcome::Appended);
    assert!(!report.saved);
    assert_eq!(report.note.content(), "# Ideas\nrust\n\nmore");
    assert_eq!(store.find(report.note.id()).unwrap().content(), "# Ideas\nrust");
}

#[test]
fn enhance_summary_does_not_save() {
    let mut store = three_notes();
    let before = store.list_all();
    let report = handle_enhance_impl(
        &enhance_args(EnhanceMode::Summarize, false),
        &mut store,
        &FixedEnhancer(Some("a list of ideas")),
        at(20_000),
    )
    .unwrap();

    assert_eq!(
        report.outcome,
        EnhanceOutcome::Summary("a list of ideas".to_string())
    );
    assert!(!report.saved);
    assert_eq!(store.list_all(), before);
}

#[test]
fn enhance_failure_is_a_notice_not_an_error() {
    let mut store = three_notes();
    let before = store.list_all();
    let report = handle_enhance_impl(
        &enhance_args(EnhanceMode::FixGrammar, false),
        &mut store,
        &FixedEnhancer(None),
        at(20_000),
    )
    .unwrap();

    assert_eq!(
        report.outcome,
        EnhanceOutcome::Failed(crate::view::AI_FAILURE_NOTICE.to_string())
    );
    assert!(!report.saved);
    assert_eq!(store.list_all(), before);
}

// ===========================================
// calendar tests
// ===========================================

fn cal_args(date: &str, month: Option<&str>) -> CalendarArgs {
    CalendarArgs {
        month: month.map(str::to_string),
        date: date.to_string(),
        format: OutputFormat::Human,
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn calendar_state_defaults_to_today() {
    let state = calendar_state(&cal_args("today", None), day(2024, 3, 14)).unwrap();
    assert_eq!(state.selected(), day(2024, 3, 14));
}

#[test]
fn calendar_month_outside_selection_selects_first_day() {
    let state = calendar_state(&cal_args("today", Some("2024-01")), day(2024, 3, 14)).unwrap();
    assert_eq!(state.selected(), day(2024, 1, 1));
}

#[test]
fn calendar_month_containing_selection_keeps_it() {
    let state =
        calendar_state(&cal_args("2024-03-09", Some("2024-03")), day(2024, 3, 14)).unwrap();
    assert_eq!(state.selected(), day(2024, 3, 9));
}

#[test]
fn calendar_rejects_bad_arguments() {
    assert!(calendar_state(&cal_args("soon", None), day(2024, 3, 14)).is_err());
    assert!(calendar_state(&cal_args("today", Some("2024-13")), day(2024, 3, 14)).is_err());
}

#[test]
fn render_month_marks_days() {
    let notes = vec![sample_note(
        "n1",
        "x",
        Utc.with_ymd_and_hms(2024, 2, 5, 12, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 2, 5, 12, 0, 0).unwrap(),
    )];
    let month = CalendarMonth::new(2024, 2).unwrap();
    let weeks = month.grid(&notes, day(2024, 2, 10), day(2024, 2, 20), &Utc);

    let text = render_month(&month, &weeks);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0].trim(), "February 2024");
    assert_eq!(lines[1], " Su   Mo   Tu   We   Th   Fr   Sa");
    // Feb 1 2024 is a Thursday
    assert_eq!(lines[2], format!("{}  1    2    3", " ".repeat(20)));
    assert!(lines[3].contains("  5* "));
    assert!(lines[3].contains("[10 ]"));
    assert!(lines[5].contains(">20"));
    assert_eq!(lines.len(), 2 + weeks.len());
}

#[test]
fn handle_calendar_succeeds_for_every_format() {
    let store = three_notes();
    for format in [OutputFormat::Human, OutputFormat::Json, OutputFormat::Ids] {
        let args = CalendarArgs {
            format,
            ..cal_args("today", Some("1970-01"))
        };
        handle_calendar(&args, &store, day(1970, 1, 1), &Utc).unwrap();
    }
}

// ===========================================
// store opening tests
// ===========================================

#[test]
fn open_store_file_backend_persists_between_opens() {
    let dir = tempfile::TempDir::new().unwrap();
    let note = sample_note("n1", "# Kept", at(1), at(1));
    {
        let mut store = open_store(dir.path(), crate::cli::Backend::File).unwrap();
        store.upsert(note.clone()).unwrap();
    }
    assert!(dir.path().join("notes.json").exists());

    let store = open_store(dir.path(), crate::cli::Backend::File).unwrap();
    assert_eq!(store.list_all(), vec![note]);
}

#[test]
fn open_store_sqlite_backend_persists_between_opens() {
    let dir = tempfile::TempDir::new().unwrap();
    let note = sample_note("n1", "# Kept", at(1), at(1));
    {
        let mut store = open_store(dir.path(), crate::cli::Backend::Sqlite).unwrap();
        store.upsert(note.clone()).unwrap();
    }
    assert!(sqlite_db_path(dir.path()).exists());

    let store = open_store(dir.path(), crate::cli::Backend::Sqlite).unwrap();
    assert_eq!(store.list_all(), vec![note]);
}

// ===========================================
// truncate_str tests
// ===========================================

#[test]
fn truncate_str_short_and_long() {
    assert_eq!(truncate_str("short", 10), "short");
    assert_eq!(truncate_str("a much longer title", 8), "a much …");
}
