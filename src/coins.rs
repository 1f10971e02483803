//! Skinning income: fur recovery events and their payouts.
//!
//! Coin lines are system messages, so they are matched against the raw
//! line without the speech filter.

use chrono::{DateTime, Duration, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::reader::LogFile;

static FUR_RECOVERY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\s*(You|.+?) recovers? the (.+?) fur, worth (\d+)c\. Your share is (\d+)c")
        .expect("valid coin regex")
});

/// One fur recovery. Never mutated after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinEvent {
    pub monster: String,
    pub worth: u64,
    pub share: u64,
    /// The scanning character did the skinning
    pub skinned: bool,
    /// Modification time of the file the event came from
    pub timestamp: DateTime<Local>,
    pub source: PathBuf,
    /// 1-based line within the source file
    pub line: usize,
}

impl CoinEvent {
    /// Identity of the physical event, shared by copies of the same log
    /// file in different folders.
    pub fn dedup_key(&self) -> (String, i64, usize) {
        let name = self
            .source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        (name, self.timestamp.timestamp(), self.line)
    }
}

/// Coin events and totals extracted from one scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoinReport {
    pub skinned_total: u64,
    pub share_total: u64,
    pub events: Vec<CoinEvent>,
}

/// Whether `actor` refers to the scanning character.
fn is_self(actor: &str, character: &str) -> bool {
    let actor = actor.trim();
    actor.eq_ignore_ascii_case("you")
        || (!character.is_empty() && actor.eq_ignore_ascii_case(character))
}

/// Extract fur recovery events from files sorted oldest first.
///
/// Files whose timestamp is strictly older than `min_time` are skipped.
/// Skinned worth only counts events the character skinned; shares count
/// for every event.
pub fn extract_coins(
    files: &[LogFile],
    character: &str,
    min_time: Option<DateTime<Local>>,
) -> CoinReport {
    let mut report = CoinReport::default();

    for file in files {
        if min_time.is_some_and(|cutoff| file.modified < cutoff) {
            continue;
        }

        for (idx, line) in file.content.lines().enumerate() {
            let Some(caps) = FUR_RECOVERY.captures(line) else {
                continue;
            };
            let (Ok(worth), Ok(share)) = (caps[3].parse::<u64>(), caps[4].parse::<u64>()) else {
                continue;
            };

            let skinned = is_self(&caps[1], character);
            if skinned {
                report.skinned_total += worth;
            }
            report.share_total += share;

            report.events.push(CoinEvent {
                monster: caps[2].to_string(),
                worth,
                share,
                skinned,
                timestamp: file.modified,
                source: file.path.clone(),
                line: idx + 1,
            });
        }
    }

    report
}

/// Drop repeated events, keeping the first occurrence of each key.
pub fn dedupe_events(events: Vec<CoinEvent>) -> Vec<CoinEvent> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|e| seen.insert(e.dedup_key()))
        .collect()
}

/// Per-monster totals for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonsterSummary {
    pub total_worth: u64,
    pub total_share: u64,
    pub own_skins: u64,
}

impl fmt::Display for MonsterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total {}c, share {}c, you skinned {}",
            self.total_worth, self.total_share, self.own_skins
        )
    }
}

/// Group events by monster name.
pub fn summarize(events: &[CoinEvent]) -> BTreeMap<String, MonsterSummary> {
    let mut summary: BTreeMap<String, MonsterSummary> = BTreeMap::new();
    for event in events {
        let entry = summary.entry(event.monster.clone()).or_default();
        entry.total_worth += event.worth;
        entry.total_share += event.share;
        if event.skinned {
            entry.own_skins += 1;
        }
    }
    summary
}

/// Preset look-back windows for coin extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    All,
    #[value(name = "5m")]
    #[serde(rename = "5m")]
    Minutes5,
    #[value(name = "10m")]
    #[serde(rename = "10m")]
    Minutes10,
    #[value(name = "30m")]
    #[serde(rename = "30m")]
    Minutes30,
    #[value(name = "1h")]
    #[serde(rename = "1h")]
    Hours1,
    #[value(name = "3h")]
    #[serde(rename = "3h")]
    Hours3,
    #[value(name = "6h")]
    #[serde(rename = "6h")]
    Hours6,
    #[value(name = "12h")]
    #[serde(rename = "12h")]
    Hours12,
    #[value(name = "24h")]
    #[serde(rename = "24h")]
    Hours24,
}

impl TimeWindow {
    /// Length of the window; `None` for all logs.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Minutes5 => Some(Duration::minutes(5)),
            TimeWindow::Minutes10 => Some(Duration::minutes(10)),
            TimeWindow::Minutes30 => Some(Duration::minutes(30)),
            TimeWindow::Hours1 => Some(Duration::hours(1)),
            TimeWindow::Hours3 => Some(Duration::hours(3)),
            TimeWindow::Hours6 => Some(Duration::hours(6)),
            TimeWindow::Hours12 => Some(Duration::hours(12)),
            TimeWindow::Hours24 => Some(Duration::hours(24)),
        }
    }

    /// Cutoff relative to `now`.
    pub fn cutoff_from(&self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        self.duration().map(|d| now - d)
    }

    pub fn cutoff(&self) -> Option<DateTime<Local>> {
        self.cutoff_from(Local::now())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <TimeWindow as clap::ValueEnum>::from_str(s, true)
    }
}
