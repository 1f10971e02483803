//! Unit tests for configuration loading and table validation

use std::fs;
use tempfile::TempDir;

use rankscan::config::Config;
use rankscan::{Encoding, TableError, TimeWindow};

use crate::helpers::write_tables;

#[test]
fn missing_file_gives_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
    assert_eq!(config.scan.workers, 4);
    assert_eq!(config.scan.encodings, vec![Encoding::Utf8, Encoding::MacRoman]);
    assert_eq!(config.scan.time_window, TimeWindow::All);
    assert!(!config.scan.dedupe_coin_events);
    assert_eq!(config.tables.trigger_phrases, "rankmessages.txt");
}

#[test]
fn partial_file_keeps_other_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        "[scan]\nworkers = 2\nencodings = [\"mac-roman\"]\ntime_window = \"3h\"\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.scan.workers, 2);
    assert_eq!(config.scan.encodings, vec![Encoding::MacRoman]);
    assert_eq!(config.scan.time_window, TimeWindow::Hours3);
    assert_eq!(config.storage.characters_file, "characters.json");
}

#[test]
fn zero_workers_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[scan]\nworkers = 0\n").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn unknown_encoding_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[scan]\nencodings = [\"ebcdic\"]\n").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn empty_encoding_list_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[scan]\nencodings = []\n").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn saved_config_loads_back() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.scan.workers = 8;
    config.scan.dedupe_coin_events = true;
    config.scan.time_window = TimeWindow::Minutes30;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.scan.workers, 8);
    assert!(loaded.scan.dedupe_coin_events);
    assert_eq!(loaded.scan.time_window, TimeWindow::Minutes30);
}

#[test]
fn tables_load_from_config_dir() {
    let temp = TempDir::new().unwrap();
    write_tables(
        temp.path(),
        &["You feel stronger", "You feel nimble"],
        &["Stonewall", "Aldo"],
        &["made progress studying the", "learned much about the movements of the."],
    );

    let tables = Config::default().load_tables(temp.path()).unwrap();
    assert_eq!(tables.triggers.len(), 2);
    let nimble = tables.triggers.iter().find(|t| t.phrase == "You feel nimble");
    assert_eq!(nimble.map(|t| t.label.as_str()), Some("Aldo"));
    // Longest first, trailing period trimmed
    assert_eq!(
        tables.study.phrases()[0].text,
        "learned much about the movements of the"
    );
}

#[test]
fn misaligned_tables_refuse_to_load() {
    let temp = TempDir::new().unwrap();
    write_tables(
        temp.path(),
        &["You feel stronger", "You feel nimble"],
        &["Stonewall"],
        &[],
    );

    let err = Config::default().load_tables(temp.path()).unwrap_err();
    match err {
        TableError::LengthMismatch {
            phrases, labels, ..
        } => {
            assert_eq!(phrases, 2);
            assert_eq!(labels, 1);
        }
        other => panic!("Expected LengthMismatch, got {:?}", other),
    }
}

#[test]
fn missing_table_is_reported() {
    let temp = TempDir::new().unwrap();
    let err = Config::default().load_tables(temp.path()).unwrap_err();
    assert!(matches!(err, TableError::Missing { .. }));
}
