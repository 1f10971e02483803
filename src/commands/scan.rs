//! Scan command handler

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use rankscan::{AggregateResult, Config, ScanJob, ScanPool, TimeWindow};

use super::{format_coins, format_counts, open_store};

/// Scan a character's folders (or the given ones) and store the results.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    character: &str,
    folders: &[PathBuf],
    since: Option<TimeWindow>,
    json: bool,
) -> Result<()> {
    let (config, mut store) = open_store()?;

    let folders = if folders.is_empty() {
        store.require(character)?.folder_paths()
    } else {
        store.require(character)?;
        folders.to_vec()
    };
    if folders.is_empty() {
        bail!(
            "Character '{}' has no folders. Add one with: rankscan folder add {} <DIR>",
            character,
            character
        );
    }

    let job = build_job(&config, character, since)?;
    let pool = ScanPool::new(config.scan.workers);
    tracing::info!(folders = folders.len(), workers = pool.workers(), "starting scan");
    let summary = pool.run(Arc::new(job), &folders);

    if !summary.scanned.is_empty() {
        store.record_scan(character, &summary.aggregate)?;
        store.save()?;
    }

    let ignored = store.require(character)?.ignored.clone();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary.aggregate)?);
    } else {
        print_report(&summary.aggregate, &ignored);
        println!(
            "Scanned {} folder(s), {} file(s) read, {} skipped",
            summary.scanned.len(),
            summary.files_read(),
            summary.files_skipped()
        );
    }

    if summary.has_failures() {
        for (folder, error) in &summary.failures {
            eprintln!("Failed to scan {}: {}", folder.display(), error);
        }
        bail!(
            "{} of {} folder(s) failed to scan",
            summary.failures.len(),
            folders.len()
        );
    }
    Ok(())
}

/// Assemble the shared job: tables, encodings and the coin cutoff.
pub(crate) fn build_job(
    config: &Config,
    character: &str,
    since: Option<TimeWindow>,
) -> Result<ScanJob> {
    let base_dir = Config::config_dir()?;
    let tables = config
        .load_tables(&base_dir)
        .context("Cannot scan without valid phrase tables")?;

    let window = since.unwrap_or(config.scan.time_window);
    let mut job = ScanJob::new(tables, character);
    job.encodings = config.scan.encodings.clone();
    job.min_time = window.cutoff();
    job.dedupe_coins = config.scan.dedupe_coin_events;
    Ok(job)
}

#[cfg(not(tarpaulin_include))]
fn print_report(aggregate: &AggregateResult, ignored: &std::collections::BTreeSet<String>) {
    print!(
        "{}",
        format_counts(&aggregate.ranks, aggregate.visible_creatures(ignored))
    );
    print!(
        "{}",
        format_coins(
            aggregate.skinned_total,
            aggregate.share_total,
            &aggregate.coin_summary()
        )
    );
}
