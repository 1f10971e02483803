//! Rank counting: literal trigger phrase occurrences per trainer.

use std::collections::BTreeMap;

use crate::classifier::is_excluded;
use crate::reader::LogFile;
use crate::tables::TriggerTable;

/// Count trigger phrase occurrences across every eligible line.
///
/// Occurrences are non-overlapping and case-sensitive. Phrases that share a
/// label add into the same total, and labels that never matched are left
/// out of the result.
pub fn count_ranks(files: &[LogFile], table: &TriggerTable) -> BTreeMap<String, u64> {
    let mut by_phrase: Vec<u64> = vec![0; table.len()];

    for file in files {
        for line in file.content.lines() {
            if is_excluded(line) {
                continue;
            }
            for (slot, trigger) in by_phrase.iter_mut().zip(table.iter()) {
                *slot += line.matches(trigger.phrase.as_str()).count() as u64;
            }
        }
    }

    let mut counts = BTreeMap::new();
    for (count, trigger) in by_phrase.into_iter().zip(table.iter()) {
        if count > 0 {
            *counts.entry(trigger.label.clone()).or_insert(0) += count;
        }
    }
    counts
}
