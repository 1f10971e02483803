//! Configuration management for rankscan

mod io;
mod types;

pub use io::HOME_ENV;
pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::error::TableError;
use crate::tables::Tables;

impl Config {
    /// Get the config file path (<config dir>/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/rankscan)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save(self)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Path of the character store
    pub fn characters_path(&self) -> Result<PathBuf> {
        Ok(resolve_path(&Self::config_dir()?, &self.storage.characters_file))
    }

    /// Path of the persistent crash record
    pub fn error_log_path(&self) -> Result<PathBuf> {
        Ok(resolve_path(&Self::config_dir()?, &self.storage.error_log))
    }

    /// Resolved paths of the three table files, in phrase, label, study order
    pub fn table_paths(&self, base_dir: &Path) -> [PathBuf; 3] {
        [
            self.tables.resolve(base_dir, &self.tables.trigger_phrases),
            self.tables.resolve(base_dir, &self.tables.trigger_labels),
            self.tables.resolve(base_dir, &self.tables.study_phrases),
        ]
    }

    /// Load the phrase tables named by this config
    pub fn load_tables(&self, base_dir: &Path) -> Result<Tables, TableError> {
        Tables::load(&self.tables, base_dir, &self.scan.encodings)
    }
}
