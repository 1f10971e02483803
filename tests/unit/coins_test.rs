//! Unit tests for coin extraction across a scan

use std::sync::Arc;

use chrono::{Duration, Local};
use rankscan::scan::scan_folder;
use rankscan::ScanPool;

use crate::helpers::{sample_job, LogFolder};

#[test]
fn own_skins_and_shares_are_totalled_separately() {
    let folder = LogFolder::new();
    folder.add_log(
        "hunt.txt",
        b"* You recover the Rat fur, worth 100c. Your share is 40c.\n\
          * Bob recovers the Rat fur, worth 50c. Your share is 10c.\n",
        60,
    );

    let result = scan_folder(&folder.path(), &sample_job("Mira")).unwrap();
    assert_eq!(result.coins.skinned_total, 100);
    assert_eq!(result.coins.share_total, 50);
    assert_eq!(result.coins.events.len(), 2);
    assert_eq!(result.coins.events[1].line, 2);
}

#[test]
fn character_name_counts_as_self() {
    let folder = LogFolder::new();
    folder.add_log(
        "hunt.txt",
        b"* Mira recovers the Orga fur, worth 30c. Your share is 15c.\n",
        60,
    );

    let result = scan_folder(&folder.path(), &sample_job("mira")).unwrap();
    assert_eq!(result.coins.skinned_total, 30);
    assert!(result.coins.events[0].skinned);
}

#[test]
fn files_older_than_the_window_are_skipped() {
    let folder = LogFolder::new();
    folder.add_log(
        "old.txt",
        b"* You recover the Rat fur, worth 100c. Your share is 40c.\n",
        7200,
    );
    folder.add_log(
        "new.txt",
        b"* You recover the Rat fur, worth 20c. Your share is 5c.\n",
        10,
    );

    let mut job = sample_job("Mira");
    job.min_time = Some(Local::now() - Duration::hours(1));
    let result = scan_folder(&folder.path(), &job).unwrap();
    assert_eq!(result.coins.skinned_total, 20);
    assert_eq!(result.coins.share_total, 5);
}

#[test]
fn overlapping_folders_double_count_unless_deduped() {
    let folder = LogFolder::new();
    folder.add_log(
        "hunt.txt",
        b"* You recover the Rat fur, worth 100c. Your share is 40c.\n",
        60,
    );
    let paths = vec![folder.path(), folder.path()];

    let plain = ScanPool::new(2).run(Arc::new(sample_job("Mira")), &paths);
    assert_eq!(plain.aggregate.skinned_total, 200);

    let mut job = sample_job("Mira");
    job.dedupe_coins = true;
    let deduped = ScanPool::new(2).run(Arc::new(job), &paths);
    assert_eq!(deduped.aggregate.skinned_total, 100);
    assert_eq!(deduped.aggregate.share_total, 40);
    assert_eq!(deduped.aggregate.coin_events.len(), 1);
}

#[test]
fn summary_groups_by_monster() {
    let folder = LogFolder::new();
    folder.add_log(
        "hunt.txt",
        b"* You recover the Rat fur, worth 100c. Your share is 40c.\n\
          * Bob recovers the Rat fur, worth 50c. Your share is 10c.\n\
          * You recover the Orga fur, worth 7c. Your share is 3c.\n",
        60,
    );
    let summary = ScanPool::new(1).run(Arc::new(sample_job("Mira")), &[folder.path()]);
    let by_monster = summary.aggregate.coin_summary();

    assert_eq!(
        by_monster["Rat"].to_string(),
        "Total 150c, share 50c, you skinned 1"
    );
    assert_eq!(by_monster["Orga"].own_skins, 1);
}
