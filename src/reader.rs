//! Decoding reader for log folders.
//!
//! Log files come from several client versions and platforms, so their
//! text encoding is not known up front. Every file is decoded with an
//! ordered list of candidate encodings and the first strict decode wins.
//! Folder reads attach each file's modification time and return the files
//! oldest first, which is the order the study state machine requires.

use chrono::{DateTime, Local};
use humansize::{format_size, BINARY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{DecodeError, ReadError};

/// A candidate text encoding for log and table files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Encoding {
    Utf8,
    /// Classic Mac OS Roman, used by older clients
    MacRoman,
    Windows1252,
}

impl Encoding {
    /// Default candidate order: UTF-8 first, then Mac Roman.
    pub const DEFAULT_ORDER: [Encoding; 2] = [Encoding::Utf8, Encoding::MacRoman];

    /// Canonical label, as written in the config file.
    pub fn label(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::MacRoman => "macintosh",
            Encoding::Windows1252 => "windows-1252",
        }
    }

    fn codec(&self) -> &'static encoding_rs::Encoding {
        match self {
            Encoding::Utf8 => encoding_rs::UTF_8,
            Encoding::MacRoman => encoding_rs::MACINTOSH,
            Encoding::Windows1252 => encoding_rs::WINDOWS_1252,
        }
    }

    /// Strictly decode `bytes`, returning `None` on any malformed sequence.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let text = self
            .codec()
            .decode_without_bom_handling_and_without_replacement(bytes)?;
        let text = match self {
            Encoding::Utf8 => text.strip_prefix('\u{feff}').unwrap_or(text.as_ref()).to_string(),
            _ => text.into_owned(),
        };
        Some(text)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "macintosh" | "mac-roman" | "macroman" | "x-mac-roman" => Ok(Encoding::MacRoman),
            "windows-1252" | "cp1252" | "latin1" | "iso-8859-1" => Ok(Encoding::Windows1252),
            other => Err(format!(
                "unknown encoding '{}' (expected utf-8, macintosh or windows-1252)",
                other
            )),
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Encoding> for String {
    fn from(value: Encoding) -> Self {
        value.label().to_string()
    }
}

/// Decode a buffer with the first candidate encoding that accepts it.
pub fn decode_bytes(
    bytes: &[u8],
    encodings: &[Encoding],
) -> Result<(String, Encoding), DecodeError> {
    for encoding in encodings {
        if let Some(text) = encoding.decode(bytes) {
            return Ok((text, *encoding));
        }
    }

    Err(DecodeError {
        tried: encodings
            .iter()
            .map(Encoding::label)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// A decoded log file. Immutable once read.
#[derive(Debug, Clone)]
pub struct LogFile {
    pub path: PathBuf,
    pub content: String,
    pub modified: DateTime<Local>,
    pub encoding: Encoding,
    pub size: u64,
}

impl LogFile {
    /// File name without the directory, for display and dedup keys.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string()
    }
}

/// Read and decode a single log file, capturing its modification time.
pub fn read_log_file(path: &Path, encodings: &[Encoding]) -> Result<LogFile, ReadError> {
    let metadata = fs::metadata(path).map_err(|e| ReadError::io(path, e))?;
    let modified: DateTime<Local> = metadata
        .modified()
        .map_err(|e| ReadError::io(path, e))?
        .into();
    let bytes = fs::read(path).map_err(|e| ReadError::io(path, e))?;
    let (content, encoding) = decode_bytes(&bytes, encodings).map_err(|source| ReadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(LogFile {
        path: path.to_path_buf(),
        content,
        modified,
        encoding,
        size: bytes.len() as u64,
    })
}

/// Read and decode a text file without file metadata (used for tables).
pub fn read_text(path: &Path, encodings: &[Encoding]) -> Result<String, ReadError> {
    let bytes = fs::read(path).map_err(|e| ReadError::io(path, e))?;
    decode_bytes(&bytes, encodings)
        .map(|(text, _)| text)
        .map_err(|source| ReadError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// A file that was left out of a folder read.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// The readable files of one folder, oldest first.
#[derive(Debug, Clone, Default)]
pub struct FolderRead {
    pub files: Vec<LogFile>,
    pub skipped: Vec<SkippedFile>,
}

impl FolderRead {
    /// Total decoded bytes across all files
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Get human-readable total size
    pub fn size_human(&self) -> String {
        format_size(self.total_size(), BINARY)
    }
}

/// Read every regular file directly inside `folder`.
///
/// Files that cannot be read or decoded are skipped with a warning so one
/// corrupt log does not abort the scan. Only failing to list the folder
/// itself is an error.
pub fn read_folder(folder: &Path, encodings: &[Encoding]) -> Result<FolderRead, ReadError> {
    if !folder.is_dir() {
        return Err(ReadError::NotADirectory {
            path: folder.to_path_buf(),
        });
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(folder)
        .map_err(|e| ReadError::io(folder, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut read = FolderRead::default();
    for path in paths {
        match read_log_file(&path, encodings) {
            Ok(file) => read.files.push(file),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unreadable log file");
                read.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    // Stable: files with equal mtimes stay in path order
    read.files.sort_by(|a, b| a.modified.cmp(&b.modified));

    Ok(read)
}
