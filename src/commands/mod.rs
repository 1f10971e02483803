//! Command handlers for the rankscan CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod character;
pub mod completions;
pub mod config;
pub mod export;
pub mod folder;
pub mod ignore;
pub mod scan;
pub mod search;
pub mod show;

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt::Write as _;

use rankscan::{CharacterStore, Config, MonsterSummary, StudyCount};

/// Load the config and the character store it points at.
pub fn open_store() -> Result<(Config, CharacterStore)> {
    let config = Config::load()?;
    let path = config.characters_path()?;
    let store = CharacterStore::load(&path)
        .with_context(|| format!("Failed to open character store at {:?}", path))?;
    Ok((config, store))
}

/// Render rank and study counts as two sections, labels padded per section.
pub fn format_counts<'a, I>(ranks: &BTreeMap<String, u64>, creatures: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a StudyCount)>,
{
    let creatures: Vec<(&String, &StudyCount)> = creatures.into_iter().collect();
    let rank_width = ranks.keys().map(|l| l.chars().count()).max().unwrap_or(0);
    let study_width = creatures
        .iter()
        .map(|(l, _)| l.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "Ranks:");
    if ranks.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (label, count) in ranks {
        let _ = writeln!(out, "  {:<width$}  {}", label, count, width = rank_width);
    }

    let _ = writeln!(out, "Studies:");
    if creatures.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (label, count) in creatures {
        let _ = writeln!(out, "  {:<width$}  {}", label, count, width = study_width);
    }
    out
}

/// Render coin totals followed by one line per monster.
pub fn format_coins(
    skinned_total: u64,
    share_total: u64,
    summary: &BTreeMap<String, MonsterSummary>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Coins: {}c (skinned {}c, shares {}c)",
        skinned_total + share_total,
        skinned_total,
        share_total
    );
    for (monster, stats) in summary {
        let _ = writeln!(out, "  {}: {}", monster, stats);
    }
    out
}
