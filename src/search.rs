//! Find log files containing a literal phrase.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::reader::{decode_bytes, Encoding};

fn is_log_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

/// Collect `.txt` files below `dir`, descending into subdirectories.
fn collect_log_files(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in WalkDir::new(dir).into_iter() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Cannot list {}: {}", dir.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file() && is_log_file(entry.path()) {
            out.push(entry.into_path());
        }
    }
}

/// Whether the file's text contains `phrase` (case-sensitive).
///
/// Bytes that decode under none of the encodings are read lossily as UTF-8.
fn file_contains(path: &Path, phrase: &str, encodings: &[Encoding]) -> bool {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Skipping {}: {}", path.display(), e);
            return false;
        }
    };
    match decode_bytes(&bytes, encodings) {
        Ok((text, _)) => text.contains(phrase),
        Err(_) => String::from_utf8_lossy(&bytes).contains(phrase),
    }
}

/// List every log file under `folders` that mentions `phrase`, sorted by path.
pub fn search_folders(folders: &[PathBuf], phrase: &str, encodings: &[Encoding]) -> Vec<PathBuf> {
    if phrase.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for folder in folders {
        collect_log_files(folder, &mut candidates);
    }
    candidates.sort();
    candidates.dedup();

    let matches: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|path| file_contains(path, phrase, encodings))
        .collect();
    tracing::info!("Search for {:?} matched {} files", phrase, matches.len());
    matches
}
