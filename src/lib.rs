//! rankscan Library
//!
//! Turns folders of game session logs into rank counts, study progress and
//! coin totals for a character. Folders are scanned concurrently and merged
//! by a single consumer into one [`AggregateResult`].

pub mod aggregate;
pub mod classifier;
pub mod coins;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod profile;
pub mod ranks;
pub mod reader;
pub mod scan;
pub mod search;
pub mod study;
pub mod tables;

pub use aggregate::AggregateResult;
pub use coins::{CoinEvent, CoinReport, MonsterSummary, TimeWindow};
pub use config::Config;
pub use error::{DecodeError, ReadError, ScanError, TableError};
pub use profile::{Character, CharacterStore};
pub use reader::{Encoding, LogFile};
pub use scan::{ScanJob, ScanPool, ScanResult, ScanSummary};
pub use study::{Category, StudyCount};
pub use tables::{StudyPhraseTable, Tables, TriggerTable};
