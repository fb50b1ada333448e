use moodlog::constants::STORE_KEY;
use moodlog::journal_core::stats::{entry_frequency_by_date, mood_histogram};
use moodlog::journal_core::{JournalEntry, Mood};
use moodlog::journal_io::{FileStorage, KeyValueStorage};
use moodlog::store::StoreSnapshot;
use moodlog::{AppError, EntryStore, StorePolicy};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn open_store(dir: &Path) -> EntryStore {
    let storage = Arc::new(FileStorage::open(dir).unwrap());
    EntryStore::open(storage, StorePolicy::default()).unwrap()
}

fn entry(id: &str, date: &str, text: &str, mood: &str) -> JournalEntry {
    JournalEntry::new(id, date, text, Mood::from_symbol(mood))
}

#[test]
fn test_entries_survive_reopen() {
    let dir = tempdir().unwrap();
    {
        let mut store = open_store(dir.path());
        store.login("ada").unwrap();
        store
            .add_entry(entry("a", "01/01/2025", "hi\nthere", "😊").with_image("file:///a.png"))
            .unwrap();
        store.add_entry(entry("b", "01/02/2025", "", "😴")).unwrap();
    }

    let store = open_store(dir.path());
    assert_eq!(store.current_user(), Some("ada"));
    assert_eq!(
        store.list_entries(),
        vec![
            entry("a", "01/01/2025", "hi\nthere", "😊").with_image("file:///a.png"),
            entry("b", "01/02/2025", "", "😴"),
        ]
    );
}

#[test]
fn test_add_then_update_yields_single_entry() {
    let dir = tempdir().unwrap();
    let mut store = open_store(dir.path());
    store.login("ada").unwrap();

    store.add_entry(entry("a", "01/01/2025", "hi", "😊")).unwrap();
    assert!(store.update_entry(entry("a", "01/01/2025", "bye", "😢")).unwrap());
    drop(store);

    let store = open_store(dir.path());
    let entries = store.list_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "bye");
    assert_eq!(entries[0].mood.symbol(), "😢");
}

#[test]
fn test_logout_wipes_persisted_state() {
    let dir = tempdir().unwrap();
    let mut store = open_store(dir.path());
    store.login("ada").unwrap();
    store.add_entry(entry("a", "01/01/2025", "private", "😊")).unwrap();
    store.logout();
    store.flush();

    let storage = FileStorage::open(dir.path()).unwrap();
    let bytes = storage.load(STORE_KEY).unwrap().unwrap();
    let snapshot = StoreSnapshot::decode(STORE_KEY, &bytes).unwrap();
    assert_eq!(snapshot.user, None);
    assert!(snapshot.entries.is_empty());
}

#[test]
fn test_corrupt_file_starts_empty_and_recovers() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();
    fs::write(storage.slot_path(STORE_KEY).unwrap(), b"not a snapshot").unwrap();

    let mut store = open_store(dir.path());
    assert!(store.list_entries().is_empty());
    assert_eq!(store.current_user(), None);

    store.login("ada").unwrap();
    store.add_entry(entry("a", "01/01/2025", "fresh", "😊")).unwrap();
    drop(store);

    let store = open_store(dir.path());
    assert_eq!(store.list_entries().len(), 1);
}

#[test]
fn test_gated_store_rejects_changes_while_logged_out() {
    let dir = tempdir().unwrap();
    let mut store = open_store(dir.path());
    assert!(matches!(
        store.add_entry(entry("a", "01/01/2025", "", "😊")),
        Err(AppError::NotAuthenticated)
    ));
    store.flush();
    assert!(!dir.path().join("root.json").exists());
}

#[test]
fn test_projections_over_restored_entries() {
    let dir = tempdir().unwrap();
    {
        let mut store = open_store(dir.path());
        store.login("ada").unwrap();
        store.add_entry(entry("1", "01/01/2025", "", "😊")).unwrap();
        store.add_entry(entry("2", "01/01/2025", "", "😢")).unwrap();
        store.add_entry(entry("3", "01/02/2025", "", "😊")).unwrap();
    }

    let entries = open_store(dir.path()).list_entries();
    let moods = mood_histogram(&entries);
    assert_eq!(moods.get(&Mood::Happy), Some(&2));
    assert_eq!(moods.get(&Mood::Sad), Some(&1));

    let dates = entry_frequency_by_date(&entries);
    assert_eq!(dates.get("01/01/2025"), Some(&2));
    assert_eq!(dates.get("01/02/2025"), Some(&1));
}

#[cfg(unix)]
#[test]
fn test_snapshot_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let mut store = open_store(dir.path());
    store.login("ada").unwrap();
    store.flush();

    let mode = fs::metadata(dir.path().join("root.json"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
