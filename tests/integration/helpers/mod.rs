//! Helpers for driving the rankscan binary

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated config directory plus a folder for logs
pub struct Sandbox {
    pub home: TempDir,
    pub logs: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("Failed to create home dir"),
            logs: TempDir::new().expect("Failed to create logs dir"),
        }
    }

    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    pub fn logs_path(&self) -> PathBuf {
        self.logs.path().to_path_buf()
    }

    /// A `rankscan` command bound to this sandbox's config directory
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("rankscan").expect("binary exists");
        cmd.env("RANKSCAN_HOME", self.home.path())
            .env_remove("RANKSCAN_LOG")
            .env_remove("RANKSCAN_LOG_PATH")
            .env("NO_COLOR", "1");
        cmd
    }

    pub fn write_tables(&self, phrases: &[&str], labels: &[&str], study: &[&str]) {
        let join = |entries: &[&str]| {
            entries.iter().map(|e| format!("{}\n", e)).collect::<String>()
        };
        fs::write(self.home.path().join("rankmessages.txt"), join(phrases)).unwrap();
        fs::write(self.home.path().join("trainers.txt"), join(labels)).unwrap();
        fs::write(self.home.path().join("specialphrases.txt"), join(study)).unwrap();
    }

    pub fn write_log(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.logs.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Standard tables, one character and one assigned log folder
    pub fn with_character(&self, name: &str) {
        self.write_tables(
            &["You feel stronger", "You feel nimble"],
            &["Stonewall", "Aldo"],
            &["learned a little about the ways of the", "made progress studying the"],
        );
        self.cmd().args(["character", "add", name]).assert().success();
        self.cmd()
            .args(["folder", "add", name])
            .arg(self.logs.path())
            .assert()
            .success();
    }
}
