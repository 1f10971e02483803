//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::coins::TimeWindow;
use crate::reader::Encoding;
use crate::scan::DEFAULT_WORKERS;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tables: TablesConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Locations of the phrase table files
///
/// Relative paths resolve against the config directory; `~/` expands to
/// the home directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesConfig {
    /// Trigger phrases, one per line
    #[serde(default = "default_trigger_phrases")]
    pub trigger_phrases: String,
    /// Trainer labels, line for line with `trigger_phrases`
    #[serde(default = "default_trigger_labels")]
    pub trigger_labels: String,
    /// Study progress phrases
    #[serde(default = "default_study_phrases")]
    pub study_phrases: String,
}

pub fn default_trigger_phrases() -> String {
    "rankmessages.txt".to_string()
}

pub fn default_trigger_labels() -> String {
    "trainers.txt".to_string()
}

pub fn default_study_phrases() -> String {
    "specialphrases.txt".to_string()
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            trigger_phrases: default_trigger_phrases(),
            trigger_labels: default_trigger_labels(),
            study_phrases: default_study_phrases(),
        }
    }
}

impl TablesConfig {
    /// Resolve a configured table path against `base_dir`.
    pub fn resolve(&self, base_dir: &Path, name: &str) -> PathBuf {
        resolve_path(base_dir, name)
    }
}

/// Expand `~/` and anchor relative paths at `base_dir`.
pub fn resolve_path(base_dir: &Path, name: &str) -> PathBuf {
    if let Some(stripped) = name.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    let path = PathBuf::from(name);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

/// Scan behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Number of folders scanned in parallel
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Candidate encodings, tried in order
    #[serde(default = "default_encodings")]
    pub encodings: Vec<Encoding>,
    /// Default look-back window for coin events
    #[serde(default)]
    pub time_window: TimeWindow,
    /// Drop coin events repeated across overlapping folders
    #[serde(default)]
    pub dedupe_coin_events: bool,
}

pub fn default_workers() -> usize {
    DEFAULT_WORKERS
}

pub fn default_encodings() -> Vec<Encoding> {
    Encoding::DEFAULT_ORDER.to_vec()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            encodings: default_encodings(),
            time_window: TimeWindow::default(),
            dedupe_coin_events: false,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("scan.workers must be > 0".to_string());
        }
        if self.workers > 64 {
            return Err(format!("scan.workers {} exceeds maximum (64)", self.workers));
        }
        if self.encodings.is_empty() {
            return Err("scan.encodings must list at least one encoding".to_string());
        }
        Ok(())
    }
}

/// Where characters and the crash record are kept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_characters_file")]
    pub characters_file: String,
    #[serde(default = "default_error_log")]
    pub error_log: String,
}

pub fn default_characters_file() -> String {
    "characters.json".to_string()
}

pub fn default_error_log() -> String {
    "error_log.txt".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            characters_file: default_characters_file(),
            error_log: default_error_log(),
        }
    }
}
