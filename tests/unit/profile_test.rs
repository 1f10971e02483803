//! Unit tests for the character store and CSV export

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use rankscan::export::to_csv_string;
use rankscan::{CharacterStore, ScanPool};

use crate::helpers::{sample_job, LogFolder};

#[test]
fn rescan_replaces_stored_counts() {
    let temp = TempDir::new().unwrap();
    let store_path = temp.path().join("characters.json");
    let folder = LogFolder::new();
    folder.add_log("log.txt", b"You feel stronger.\n", 60);
    let pool = ScanPool::new(1);

    let mut store = CharacterStore::load(&store_path).unwrap();
    store.add_character("Mira");
    for _ in 0..2 {
        let summary = pool.run(Arc::new(sample_job("Mira")), &[folder.path()]);
        store.record_scan("Mira", &summary.aggregate).unwrap();
    }
    store.save().unwrap();

    let reloaded = CharacterStore::load(&store_path).unwrap();
    assert_eq!(reloaded.get("Mira").unwrap().ranks.get("Stonewall"), Some(&1));
}

#[test]
fn export_skips_ignored_studies() {
    let temp = TempDir::new().unwrap();
    let folder = LogFolder::new();
    folder.add_log(
        "log.txt",
        b"You feel nimble.\n\
          You have learned a little about the ways of the Rat.\n\
          You have made progress studying the Vermine.\n",
        60,
    );

    let mut store = CharacterStore::load(&temp.path().join("c.json")).unwrap();
    store.add_character("Mira");
    let summary = ScanPool::new(1).run(Arc::new(sample_job("Mira")), &[folder.path()]);
    store.record_scan("Mira", &summary.aggregate).unwrap();
    store
        .ignore("Mira", "made progress studying the Vermine")
        .unwrap();

    let mira = store.get("Mira").unwrap();
    let csv = to_csv_string(&mira.ranks, mira.visible_creatures());
    assert_eq!(
        csv,
        "Trainer,Ranks\nAldo,1\nlearned a little about Rat (ways),1\n"
    );
}

#[test]
fn corrupt_store_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("c.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(CharacterStore::load(&path).is_err());
}

#[test]
fn removing_a_character_drops_its_results() {
    let temp = TempDir::new().unwrap();
    let mut store = CharacterStore::load(&temp.path().join("c.json")).unwrap();
    store.add_character("Mira");
    store.add_character("Bob");
    assert!(store.remove_character("Mira"));
    assert!(!store.remove_character("Mira"));
    assert_eq!(store.names().collect::<Vec<_>>(), vec!["Bob"]);
}
