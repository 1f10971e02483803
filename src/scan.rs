//! Folder scans and the worker pool that runs them.
//!
//! Each folder is scanned by one task that reads its files and returns a
//! [`ScanResult`] by value. Tasks never touch shared state; their outcomes
//! travel over a channel to the single consumer in [`ScanPool::run`],
//! which is the only place the aggregate is mutated.
//!
//! # Failure handling
//!
//! - Unreadable files are skipped inside the task (see [`crate::reader`])
//! - A task that fails or panics produces a failed [`FolderOutcome`]
//! - Other folders of the same request are unaffected

use chrono::{DateTime, Local};
use rayon::ThreadPool;
use serde::Serialize;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::Instant;

use crate::aggregate::AggregateResult;
use crate::coins::{extract_coins, CoinReport};
use crate::error::ScanError;
use crate::logging;
use crate::ranks::count_ranks;
use crate::reader::{read_folder, Encoding, SkippedFile};
use crate::study::{track_study, StudyReport};
use crate::tables::Tables;

/// Default number of folders scanned at once.
pub const DEFAULT_WORKERS: usize = 4;

/// Everything a scan task needs, shared read-only between tasks.
#[derive(Debug, Clone)]
pub struct ScanJob {
    pub tables: Tables,
    pub encodings: Vec<Encoding>,
    /// Character name, used to attribute skinning
    pub character: String,
    /// Coin events from files older than this are dropped
    pub min_time: Option<DateTime<Local>>,
    pub dedupe_coins: bool,
}

impl ScanJob {
    pub fn new(tables: Tables, character: impl Into<String>) -> Self {
        Self {
            tables,
            encodings: Encoding::DEFAULT_ORDER.to_vec(),
            character: character.into(),
            min_time: None,
            dedupe_coins: false,
        }
    }
}

/// Result of scanning one folder.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub folder: PathBuf,
    pub ranks: BTreeMap<String, u64>,
    pub study: StudyReport,
    pub coins: CoinReport,
    pub files_read: usize,
    #[serde(skip)]
    pub skipped: Vec<SkippedFile>,
    pub bytes_read: u64,
}

/// Scan one folder. Pure over the folder's files.
pub fn scan_folder(folder: &Path, job: &ScanJob) -> Result<ScanResult, ScanError> {
    let started = Instant::now();
    let read = read_folder(folder, &job.encodings)?;

    let ranks = count_ranks(&read.files, &job.tables.triggers);
    let study = track_study(&read.files, &job.tables.study);
    let coins = extract_coins(&read.files, &job.character, job.min_time);

    tracing::info!(
        folder = %folder.display(),
        files = read.files.len(),
        skipped = read.skipped.len(),
        size = %read.size_human(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "folder scanned"
    );

    Ok(ScanResult {
        folder: folder.to_path_buf(),
        ranks,
        study,
        coins,
        files_read: read.files.len(),
        bytes_read: read.total_size(),
        skipped: read.skipped,
    })
}

/// Outcome of one folder's task.
#[derive(Debug)]
pub struct FolderOutcome {
    pub folder: PathBuf,
    pub result: Result<ScanResult, ScanError>,
}

/// Merged outcome of a whole scan request.
#[derive(Debug, Default)]
pub struct ScanSummary {
    pub aggregate: AggregateResult,
    /// Successful folder results, in completion order
    pub scanned: Vec<ScanResult>,
    pub failures: Vec<(PathBuf, ScanError)>,
}

impl ScanSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn files_read(&self) -> usize {
        self.scanned.iter().map(|s| s.files_read).sum()
    }

    pub fn files_skipped(&self) -> usize {
        self.scanned.iter().map(|s| s.skipped.len()).sum()
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run `scan_folder`, converting a panic into a [`ScanError`].
///
/// A caught panic is a folder failure, not a crash, so it stays out of the
/// error log.
fn run_task(folder: &Path, job: &ScanJob) -> Result<ScanResult, ScanError> {
    logging::without_crash_record(|| catch_unwind(AssertUnwindSafe(|| scan_folder(folder, job))))
        .unwrap_or_else(|payload| {
            Err(ScanError::Panicked {
                message: panic_message(payload),
            })
        })
}

/// Fixed-size pool running one scan task per folder.
pub struct ScanPool {
    pool: Option<ThreadPool>,
    workers: usize,
}

impl ScanPool {
    /// Build a pool with `workers` threads (at least one).
    ///
    /// If the thread pool cannot be created, folders are scanned
    /// sequentially on the calling thread.
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("scan-{}", i))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                tracing::warn!(error = %e, "failed to create scan pool, scanning sequentially");
                None
            }
        };
        Self { pool, workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Scan every folder, handing each outcome to `on_outcome` as it
    /// completes. Outcomes arrive in any order; `on_outcome` always runs on
    /// the calling thread.
    pub fn scan_each<F>(&self, job: Arc<ScanJob>, folders: &[PathBuf], mut on_outcome: F)
    where
        F: FnMut(FolderOutcome),
    {
        let Some(pool) = &self.pool else {
            for folder in folders {
                let result = run_task(folder, &job);
                on_outcome(FolderOutcome {
                    folder: folder.clone(),
                    result,
                });
            }
            return;
        };

        let (tx, rx) = mpsc::channel();
        for folder in folders {
            let tx = tx.clone();
            let job = Arc::clone(&job);
            let folder = folder.clone();
            pool.spawn(move || {
                let result = run_task(&folder, &job);
                // Receiver only goes away if the consumer itself panicked
                let _ = tx.send(FolderOutcome { folder, result });
            });
        }
        drop(tx);

        for outcome in rx {
            on_outcome(outcome);
        }
    }

    /// Scan every folder and merge the results into a fresh aggregate.
    pub fn run(&self, job: Arc<ScanJob>, folders: &[PathBuf]) -> ScanSummary {
        let dedupe = job.dedupe_coins;
        let mut summary = ScanSummary::default();

        self.scan_each(job, folders, |outcome| match outcome.result {
            Ok(result) => {
                summary.aggregate.merge(&result);
                summary.scanned.push(result);
            }
            Err(e) => {
                tracing::warn!(
                    folder = %outcome.folder.display(),
                    error = %e,
                    "folder scan failed"
                );
                summary.failures.push((outcome.folder, e));
            }
        });

        if dedupe {
            summary.aggregate.dedupe_coins();
        }
        summary
    }
}
