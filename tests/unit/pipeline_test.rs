//! Unit tests for folder scans and the worker pool

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use rankscan::scan::scan_folder;
use rankscan::{ScanError, ScanPool, StudyCount};

use crate::helpers::{sample_job, LogFolder};

const RAT_WAYS: &str = "learned a little about Rat (ways)";

#[test]
fn ranks_sum_phrases_sharing_a_label() {
    let folder = LogFolder::new();
    folder.add_log(
        "a.txt",
        b"[10:00:00] You feel stronger. You feel stronger!\n\
          [10:01:00] Your muscles ache.\n\
          [10:02:00] You feel nimble.\n\
          [10:03:00] Aldo says, \"You feel nimble\"\n",
        60,
    );

    let result = scan_folder(&folder.path(), &sample_job("Mira")).unwrap();
    assert_eq!(result.ranks.get("Stonewall"), Some(&3));
    assert_eq!(result.ranks.get("Aldo"), Some(&1));
    assert_eq!(result.files_read, 1);
}

#[test]
fn files_are_processed_oldest_first() {
    let folder = LogFolder::new();
    // "a" sorts first by name but is the newest file
    folder.add_log(
        "a.txt",
        b"You have learned a little about the ways of the Rat.\n",
        10,
    );
    folder.add_log("b.txt", b"You abandon your study of the Rat.\n", 3600);

    let result = scan_folder(&folder.path(), &sample_job("Mira")).unwrap();
    assert!(result.study.counts.is_empty());
    assert!(result.study.context.is_abandoned("rat"));
}

#[test]
fn mac_roman_log_is_read() {
    let folder = LogFolder::new();
    // 0x8E is "é" in Mac Roman and invalid on its own in UTF-8
    folder.add_log(
        "old.txt",
        b"Caf\x8E talk.\nYou feel stronger.\n",
        60,
    );

    let result = scan_folder(&folder.path(), &sample_job("Mira")).unwrap();
    assert_eq!(result.files_read, 1);
    assert!(result.skipped.is_empty());
    assert_eq!(result.ranks.get("Stonewall"), Some(&1));
}

#[test]
fn missing_folder_is_a_read_error() {
    let folder = LogFolder::new();
    let gone = folder.path().join("gone");
    let err = scan_folder(&gone, &sample_job("Mira")).unwrap_err();
    assert!(matches!(err, ScanError::Read(_)));
}

#[test]
fn pool_merges_all_folders() {
    let folders: Vec<LogFolder> = (0..3).map(|_| LogFolder::new()).collect();
    for folder in &folders {
        folder.add_log("log.txt", b"You feel stronger.\n", 60);
    }
    let paths: Vec<PathBuf> = folders.iter().map(LogFolder::path).collect();

    let summary = ScanPool::new(4).run(Arc::new(sample_job("Mira")), &paths);
    assert!(!summary.has_failures());
    assert_eq!(summary.scanned.len(), 3);
    assert_eq!(summary.aggregate.ranks.get("Stonewall"), Some(&3));
    assert_eq!(summary.files_read(), 3);
}

#[test]
fn failed_folder_does_not_block_the_others() {
    let good = LogFolder::new();
    good.add_log("log.txt", b"You feel nimble.\n", 60);
    let missing = good.path().join("missing");

    let summary =
        ScanPool::new(2).run(Arc::new(sample_job("Mira")), &[good.path(), missing.clone()]);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0, missing);
    assert_eq!(summary.aggregate.ranks.get("Aldo"), Some(&1));
}

#[test]
fn rescanning_is_idempotent() {
    let folder = LogFolder::new();
    folder.add_log(
        "log.txt",
        "Would you like to apply some of your learning to Rat’s lessons?\n\
         Congratulations! You should now understand much more of Rat’s teachings.\n\
         You have learned a little about the ways of the Rat.\n\
         You have learned a little about the ways of the Rat.\n\
         You feel stronger.\n"
            .as_bytes(),
        60,
    );
    let job = Arc::new(sample_job("Mira"));
    let pool = ScanPool::new(4);

    let first = pool.run(Arc::clone(&job), &[folder.path()]);
    let second = pool.run(job, &[folder.path()]);

    assert_eq!(first.aggregate.creatures.get(RAT_WAYS), Some(&StudyCount::new(2, 1)));
    assert_eq!(first.aggregate.creatures, second.aggregate.creatures);
    assert_eq!(first.aggregate.ranks, second.aggregate.ranks);
}

#[test]
fn study_base_comes_from_one_folder_while_bonus_adds() {
    let older = LogFolder::new();
    older.add_log(
        "log.txt",
        "Would you like to apply some of your learning to Rat’s lessons?\n\
         Congratulations! You should now understand much more of Rat’s teachings.\n\
         You have learned a little about the ways of the Rat.\n"
            .as_bytes(),
        60,
    );
    let newer = LogFolder::new();
    newer.add_log(
        "log.txt",
        "Would you like to apply some of your learning to Rat’s lessons?\n\
         Congratulations! You should now understand much more of Rat’s teachings.\n\
         You have learned a little about the ways of the Rat.\n"
            .as_bytes(),
        60,
    );

    let summary = ScanPool::new(2).run(Arc::new(sample_job("Mira")), &[older.path(), newer.path()]);
    assert_eq!(
        summary.aggregate.creatures.get(RAT_WAYS),
        Some(&StudyCount::new(1, 2))
    );
}

#[test]
fn ignored_labels_are_hidden_not_dropped() {
    let folder = LogFolder::new();
    folder.add_log(
        "log.txt",
        b"You have learned a little about the ways of the Rat.\n\
          You have made progress studying the Vermine.\n",
        60,
    );
    let summary = ScanPool::new(1).run(Arc::new(sample_job("Mira")), &[folder.path()]);

    let ignored: BTreeSet<String> = [RAT_WAYS.to_string()].into_iter().collect();
    let visible: Vec<&String> = summary
        .aggregate
        .visible_creatures(&ignored)
        .map(|(label, _)| label)
        .collect();
    assert_eq!(visible, vec!["made progress studying the Vermine"]);
    assert_eq!(summary.aggregate.creatures.len(), 2);
}
