use std::fs;

use pretty_assertions::assert_eq;
use predictor_core::{DraftSnapshot, Theme};
use predictor_store::{
    decode_draft, ensure_store_dir, load_draft, load_theme, save_draft, save_theme,
    AtomicFileWriter, FileStore, LocalStore, MemoryStore, StoreError, DRAFT_KEY, STORE_FILENAME,
    THEME_KEY,
};
use tempfile::TempDir;

#[test]
fn creates_missing_store_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("store");
    assert!(!new_dir.exists());
    ensure_store_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("store.ron", "hello").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("store.ron", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn store_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    assert!(FileStore::open(&file_path).is_err());
}

#[test]
fn file_store_survives_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let mut store = FileStore::open(temp.path()).unwrap();
        store.set(THEME_KEY, "dark").unwrap();
        store.set("other", "1").unwrap();
        store.remove("other").unwrap();
    }

    let store = FileStore::open(temp.path()).unwrap();
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    assert_eq!(store.get("other").unwrap(), None);
    assert!(temp.path().join(STORE_FILENAME).is_file());
}

#[test]
fn corrupt_store_file_opens_empty() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(STORE_FILENAME), "not ron at all {{").unwrap();

    let store = FileStore::open(temp.path()).unwrap();
    assert_eq!(store.get(THEME_KEY).unwrap(), None);
}

#[test]
fn theme_round_trips_through_store() {
    let mut store = MemoryStore::new();
    assert_eq!(load_theme(&store), None);

    save_theme(&mut store, Theme::Dark).unwrap();
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    assert_eq!(load_theme(&store), Some(Theme::Dark));

    save_theme(&mut store, Theme::Light).unwrap();
    assert_eq!(load_theme(&store), Some(Theme::Light));
}

#[test]
fn draft_is_stored_as_json_and_last_write_wins() {
    let temp = TempDir::new().unwrap();
    let mut store = FileStore::open(temp.path()).unwrap();

    let first: DraftSnapshot = [("gender", "male")].into_iter().collect();
    save_draft(&mut store, &first).unwrap();
    let second: DraftSnapshot = [("gender", "female"), ("lunch", "standard")]
        .into_iter()
        .collect();
    save_draft(&mut store, &second).unwrap();

    assert_eq!(
        store.get(DRAFT_KEY).unwrap().as_deref(),
        Some(r#"{"gender":"female","lunch":"standard"}"#)
    );

    let reopened = FileStore::open(temp.path()).unwrap();
    assert_eq!(load_draft(&reopened), Some(second));
}

#[test]
fn malformed_draft_is_discarded() {
    let mut store = MemoryStore::new();
    store.set(DRAFT_KEY, "[1, 2, 3]").unwrap();
    assert_eq!(load_draft(&store), None);
    assert_eq!(load_draft(&MemoryStore::new()), None);
}

#[test]
fn decode_draft_reports_non_object_values() {
    assert!(matches!(decode_draft("[1, 2]"), Err(StoreError::Decode(_))));
    assert!(matches!(decode_draft("{\"gender\": 3}"), Err(StoreError::Decode(_))));

    let draft = decode_draft(r#"{"gender":"male"}"#).unwrap();
    assert_eq!(draft.get("gender"), Some("male"));
}
