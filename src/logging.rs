//! Tracing subscriber setup and the persistent crash record.

use std::cell::Cell;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `RANKSCAN_LOG=rankscan::study=debug`
pub const LOG_ENV: &str = "RANKSCAN_LOG";

/// When set, log lines are appended to this file instead of stderr
pub const LOG_PATH_ENV: &str = "RANKSCAN_LOG_PATH";

/// Default level for a given number of `-v` flags
pub fn default_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Initialize logging, writing to RANKSCAN_LOG_PATH if set, otherwise stderr.
///
/// Calling this twice is harmless; the second subscriber is discarded.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbosity).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    if let Some(path) = std::env::var_os(LOG_PATH_ENV).filter(|p| !p.is_empty()) {
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .try_init();
            return;
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

thread_local! {
    static CRASH_RECORD_SUPPRESSED: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` with crash records turned off for this thread.
///
/// For callers that catch panics themselves and report them elsewhere.
/// The previous hook still runs.
pub fn without_crash_record<R>(f: impl FnOnce() -> R) -> R {
    struct Restore(bool);
    impl Drop for Restore {
        fn drop(&mut self) {
            CRASH_RECORD_SUPPRESSED.with(|flag| flag.set(self.0));
        }
    }

    let _restore = Restore(CRASH_RECORD_SUPPRESSED.with(|flag| flag.replace(true)));
    f()
}

/// Whether panics on this thread are currently kept out of the error log.
pub fn crash_record_suppressed() -> bool {
    CRASH_RECORD_SUPPRESSED.with(Cell::get)
}

/// Append one timestamped crash entry to the error log.
pub fn append_crash_record(path: &Path, message: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(file, "[{}] {}", stamp, message)
}

/// Record panics in the error log, then hand over to the previous hook.
pub fn install_panic_hook(error_log: PathBuf) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        if !crash_record_suppressed() {
            let _ = append_crash_record(&error_log, &format!("panic at {}: {}", location, message));
        }
        previous(info);
    }));
}
