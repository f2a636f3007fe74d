use std::fs;

use space_invaders::score::ScoreStore;
use tempfile::tempdir;

#[test]
fn record_then_load_keeps_best_on_top() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.txt");
    let mut store = ScoreStore::open(&path);

    assert!(store.record(100));
    assert!(!store.record(50));

    let loaded = ScoreStore::load(&path);
    assert_eq!(loaded.first(), Some(&100));
}

#[test]
fn equal_score_is_not_a_new_best() {
    let mut store = ScoreStore::in_memory();
    assert!(store.record(300));
    assert!(!store.record(300));
    assert!(store.record(301));
    assert_eq!(store.scores(), &[301, 300]);
}

#[test]
fn missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let store = ScoreStore::open(dir.path().join("nope.txt"));
    assert!(store.scores().is_empty());
    assert_eq!(store.best(), None);
}

#[test]
fn corrupt_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.txt");
    fs::write(&path, "1200\nbanana\n").unwrap();

    assert!(ScoreStore::load(&path).is_empty());
}

#[test]
fn load_sorts_descending_and_keeps_five() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.txt");
    fs::write(&path, "300\n100\n700\n\n500\n200\n600\n").unwrap();

    assert_eq!(ScoreStore::load(&path), vec![700, 600, 500, 300, 200]);
}

#[test]
fn saved_file_has_one_score_per_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scores.txt");
    let mut store = ScoreStore::open(&path);
    store.record(10);
    store.record(20);

    assert_eq!(fs::read_to_string(&path).unwrap(), "20\n10\n");

    let reopened = ScoreStore::open(&path);
    assert_eq!(reopened.scores(), &[20, 10]);
}

#[test]
fn unwritable_location_is_swallowed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing_dir").join("scores.txt");
    let mut store = ScoreStore::open(&path);

    assert!(store.record(42));
    assert_eq!(store.best(), Some(42));
    assert!(!path.exists());
}
