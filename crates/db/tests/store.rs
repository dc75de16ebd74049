//! Integration tests for the file-backed opportunity store.
//!
//! Every test works in its own temporary directory and checks behaviour
//! through a fresh `load` where persistence matters:
//! - Missing files start an empty table; loads tolerate foreign columns
//! - Every mutation is on disk before it returns
//! - Ids are never reused, across deletes and reloads
//! - Read-only fields cannot be edited; unknown ids fail silently
//! - The spreadsheet export is a pure read

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use assert_matches::assert_matches;
use intake_core::opportunity::Field;
use intake_core::status::Status;
use intake_core::types::Date;
use intake_db::{OpportunityStore, StoreError};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const PREFIX: &str = "OP-2026";

fn table_path(dir: &TempDir) -> PathBuf {
    dir.path().join("opportunities.csv")
}

fn open(dir: &TempDir) -> OpportunityStore {
    OpportunityStore::load(table_path(dir), PREFIX).unwrap()
}

fn today() -> Date {
    Date::from_ymd_opt(2026, 2, 9).unwrap()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn missing_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    assert!(store.is_empty());
    assert!(!table_path(&dir).exists(), "load must not create the file");
}

#[test]
fn load_matches_columns_by_header() {
    let dir = TempDir::new().unwrap();
    fs::write(
        table_path(&dir),
        "Title,Opportunity ID,Legacy Column,Status\nPoint-of-care test, OP-2026-004 ,x,Draft\n",
    )
    .unwrap();

    let store = open(&dir);
    let op = store.find("OP-2026-004").expect("id should be trimmed");

    assert_eq!(op.title, "Point-of-care test");
    assert_eq!(op.status, "Draft");
    assert_eq!(op.geography, "", "missing columns load empty");
}

#[test]
fn header_only_file_is_empty_table() {
    let dir = TempDir::new().unwrap();
    fs::write(table_path(&dir), "Opportunity ID,Title\n").unwrap();

    assert!(open(&dir).is_empty());
}

#[test]
fn malformed_file_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(table_path(&dir), "Opportunity ID,Title\nOP-2026-001,\"never closed\n").unwrap();

    let err = OpportunityStore::load(table_path(&dir), PREFIX).unwrap_err();
    assert_matches!(err, StoreError::Csv { line: 2, .. });
}

// ---------------------------------------------------------------------------
// Create / update / delete
// ---------------------------------------------------------------------------

#[test]
fn create_persists_a_draft_with_defaults() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);

    let id = store.create(today()).unwrap();
    assert_eq!(id, "OP-2026-001");

    let reloaded = open(&dir);
    let op = reloaded.find(&id).unwrap();
    assert_eq!(op.status, "Draft");
    assert_eq!(op.source, "R&D");
    assert_eq!(op.urgency, "Low");
    assert_eq!(op.priority, "P3");
    assert_eq!(op.submission_date, "2026-02-09");
    assert_eq!(op.title, "");
}

#[test]
fn update_writes_through_to_disk() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let id = store.create(today()).unwrap();

    let found = store
        .update(&id, Field::ProblemStatement, "Slow, manual\n\"triage\"".into())
        .unwrap();
    assert!(found);

    let reloaded = open(&dir);
    assert_eq!(
        reloaded.find(&id).unwrap().problem_statement,
        "Slow, manual\n\"triage\""
    );
}

#[test]
fn update_unknown_id_is_silent() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);

    let found = store.update("OP-2026-404", Field::Title, "x".into()).unwrap();
    assert!(!found);
    assert!(!table_path(&dir).exists());
}

#[test]
fn read_only_fields_are_refused() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let id = store.create(today()).unwrap();

    for field in [Field::Id, Field::Status, Field::SubmissionDate] {
        let err = store.update(&id, field, "tampered".into()).unwrap_err();
        assert_matches!(err, StoreError::ReadOnlyField(_));
    }
    assert_eq!(store.find(&id).unwrap().status, "Draft");
}

#[test]
fn update_fields_applies_all_edits_or_none() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let id = store.create(today()).unwrap();

    let result = store.update_fields(
        &id,
        vec![
            (Field::Title, "Should not land".into()),
            (Field::Status, "Inactive (Parked)".into()),
        ],
    );
    assert!(result.is_err());
    assert_eq!(store.find(&id).unwrap().title, "");

    store
        .update_fields(
            &id,
            vec![
                (Field::Title, "Sepsis rapid test".into()),
                (Field::Geography, "EU".into()),
            ],
        )
        .unwrap();
    let reloaded = open(&dir);
    let op = reloaded.find(&id).unwrap();
    assert_eq!(op.title, "Sepsis rapid test");
    assert_eq!(op.geography, "EU");
}

#[test]
fn set_status_persists() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let id = store.create(today()).unwrap();

    assert!(store.set_status(&id, Status::Eligible).unwrap());
    assert_eq!(
        open(&dir).find(&id).unwrap().status,
        "Eligible for next PLM stage"
    );
}

#[test]
fn delete_removes_row_permanently() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let keep = store.create(today()).unwrap();
    let gone = store.create(today()).unwrap();

    assert!(store.delete(&gone).unwrap());
    assert!(!store.delete(&gone).unwrap(), "second delete finds nothing");

    let reloaded = open(&dir);
    assert!(reloaded.contains(&keep));
    assert!(!reloaded.contains(&gone));
}

#[test]
fn rows_keep_append_order() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let ids: Vec<_> = (0..4).map(|_| store.create(today()).unwrap()).collect();

    let listed: Vec<_> = open(&dir).list().iter().map(|op| op.id.clone()).collect();
    assert_eq!(listed, ids);
}

#[test]
fn failed_write_leaves_memory_matching_disk() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let id = store.create(today()).unwrap();

    // A directory in the temp file's place makes every table write fail.
    let blocker = dir.path().join("opportunities.csv.tmp");
    fs::create_dir(&blocker).unwrap();

    assert_matches!(store.create(today()), Err(StoreError::Io(_)));
    assert_matches!(
        store.update(&id, Field::Title, "lost".into()),
        Err(StoreError::Io(_))
    );
    assert_matches!(store.set_status(&id, Status::Parked), Err(StoreError::Io(_)));
    assert_matches!(store.delete(&id), Err(StoreError::Io(_)));

    let on_disk = open(&dir);
    assert_eq!(store.list(), on_disk.list());
    assert_eq!(store.find(&id).unwrap().title, "");
    assert_eq!(store.find(&id).unwrap().status, "Draft");

    // Once writes work again, the next id is still unique.
    fs::remove_dir(&blocker).unwrap();
    let next = store.create(today()).unwrap();
    assert_ne!(next, id);
    assert_eq!(open(&dir).len(), 2);
}

// ---------------------------------------------------------------------------
// Id uniqueness
// ---------------------------------------------------------------------------

#[test]
fn ids_are_never_reused_after_delete() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let first = store.create(today()).unwrap();
    let middle = store.create(today()).unwrap();
    let last = store.create(today()).unwrap();

    store.delete(&middle).unwrap();
    store.delete(&last).unwrap();
    let next = store.create(today()).unwrap();

    assert_eq!(next, "OP-2026-004");
    assert_ne!(next, first);
}

#[test]
fn counter_survives_reload_after_deleting_everything() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let a = store.create(today()).unwrap();
    let b = store.create(today()).unwrap();
    store.delete(&a).unwrap();
    store.delete(&b).unwrap();

    let mut reloaded = open(&dir);
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.create(today()).unwrap(), "OP-2026-003");
}

#[test]
fn counter_catches_up_with_existing_ids() {
    let dir = TempDir::new().unwrap();
    fs::write(table_path(&dir), "Opportunity ID,Title\nOP-2026-017,Imported\n").unwrap();

    let mut store = open(&dir);
    assert_eq!(store.create(today()).unwrap(), "OP-2026-018");
}

#[test]
fn interleaved_creates_and_deletes_yield_distinct_ids() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let mut seen = HashSet::new();

    for round in 0..20 {
        let id = store.create(today()).unwrap();
        assert!(seen.insert(id.clone()), "duplicate id {id}");
        if round % 3 == 0 {
            store.delete(&id).unwrap();
        }
    }
}

// ---------------------------------------------------------------------------
// Round trip and export
// ---------------------------------------------------------------------------

#[test]
fn table_round_trips_through_the_file() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    for title in ["Plain", "Comma, title", "Quote \"title\"", "Multi\nline"] {
        let id = store.create(today()).unwrap();
        store.update(&id, Field::Title, title.into()).unwrap();
        store.update(&id, Field::Comments, format!("{title} notes")).unwrap();
    }

    assert_eq!(open(&dir).list(), store.list());
}

#[test]
fn export_contains_every_row_and_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let a = store.create(today()).unwrap();
    let b = store.create(today()).unwrap();
    store.update(&b, Field::Title, "Second".into()).unwrap();
    let before = fs::read_to_string(table_path(&dir)).unwrap();

    let bytes = store.export_spreadsheet().unwrap();

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut sheet = String::new();
    archive
        .by_name(intake_db::xlsx::SHEET_PART)
        .unwrap()
        .read_to_string(&mut sheet)
        .unwrap();
    assert!(sheet.contains("Opportunity ID"));
    assert!(sheet.contains(&a));
    assert!(sheet.contains(&b));
    assert!(sheet.contains("Second"));

    assert_eq!(fs::read_to_string(table_path(&dir)).unwrap(), before);
    assert_eq!(store.len(), 2);
}
