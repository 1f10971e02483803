//! Merging per-folder scan results into a character's running totals.
//!
//! Rank counts and coin totals add up across folders. Study counts do
//! not: the base count is replaced by the most recently merged folder's
//! value while bonus ranks accumulate. A scan request starts from an empty
//! aggregate, so rescanning unchanged folders reproduces the same result.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::coins::{dedupe_events, summarize, CoinEvent, MonsterSummary};
use crate::scan::ScanResult;
use crate::study::StudyCount;

/// Cumulative results for one character.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    pub ranks: BTreeMap<String, u64>,
    pub creatures: BTreeMap<String, StudyCount>,
    pub skinned_total: u64,
    pub share_total: u64,
    #[serde(default)]
    pub coin_events: Vec<CoinEvent>,
}

impl AggregateResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one folder's result.
    pub fn merge(&mut self, scan: &ScanResult) {
        for (label, count) in &scan.ranks {
            *self.ranks.entry(label.clone()).or_insert(0) += count;
        }

        for (label, count) in &scan.study.counts {
            let slot = self.creatures.entry(label.clone()).or_default();
            slot.base = count.base;
            slot.bonus += count.bonus;
        }

        self.skinned_total += scan.coins.skinned_total;
        self.share_total += scan.coins.share_total;
        self.coin_events.extend(scan.coins.events.iter().cloned());
    }

    /// Remove repeated coin events and recompute coin totals from the rest.
    pub fn dedupe_coins(&mut self) {
        self.coin_events = dedupe_events(std::mem::take(&mut self.coin_events));
        self.skinned_total = self
            .coin_events
            .iter()
            .filter(|e| e.skinned)
            .map(|e| e.worth)
            .sum();
        self.share_total = self.coin_events.iter().map(|e| e.share).sum();
    }

    pub fn total_coins(&self) -> u64 {
        self.skinned_total + self.share_total
    }

    /// Study entries not hidden by the ignore set.
    pub fn visible_creatures<'a>(
        &'a self,
        ignored: &'a BTreeSet<String>,
    ) -> impl Iterator<Item = (&'a String, &'a StudyCount)> + 'a {
        self.creatures
            .iter()
            .filter(move |(label, _)| !ignored.contains(*label))
    }

    pub fn coin_summary(&self) -> BTreeMap<String, MonsterSummary> {
        summarize(&self.coin_events)
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty() && self.creatures.is_empty() && self.coin_events.is_empty()
    }
}
