//! The study progress state machine.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::context::{normalize_name, ScanContext, Transition};
use super::intent::{recognize, Intent};
use super::{Category, StudyCount};
use crate::classifier::{is_excluded, strip_timestamp};
use crate::reader::LogFile;
use crate::tables::StudyPhraseTable;

const PROGRESS_ANCHOR: &str = "you have ";

/// The canonical progress sentence.
static PROGRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)you have .*? about the (ways|movements|essence) of the (.+?)\.\s*$")
        .expect("valid progress regex")
});

/// Tally for one (subject, category) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyEntry {
    /// Display label from the most recent matching line
    pub label: String,
    /// Subject as written in the log
    pub subject: String,
    pub category: Option<Category>,
    pub count: u64,
}

/// Final study report of one scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StudyReport {
    /// Label to progress count, mastered studies removed
    pub counts: BTreeMap<String, StudyCount>,
    pub context: ScanContext,
}

/// Line by line study tracker for one scan.
///
/// Lines must be fed in chronological order: a study abandoned or
/// mastered earlier suppresses progress seen later.
pub struct StudyTracker<'t> {
    phrases: &'t StudyPhraseTable,
    context: ScanContext,
    entries: BTreeMap<(String, Option<Category>), StudyEntry>,
}

/// Byte index of an ASCII needle, ignoring ASCII case.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    if n.len() > h.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

impl<'t> StudyTracker<'t> {
    pub fn new(phrases: &'t StudyPhraseTable) -> Self {
        Self {
            phrases,
            context: ScanContext::new(),
            entries: BTreeMap::new(),
        }
    }

    /// Process one raw log line.
    pub fn feed_line(&mut self, raw: &str) {
        let line = strip_timestamp(raw.trim());
        if is_excluded(line) {
            return;
        }
        let low = line.to_lowercase();

        if let Some(intent) = recognize(line, &low) {
            self.apply_intent(intent);
            return;
        }

        if !low.contains(PROGRESS_ANCHOR) {
            return;
        }
        self.record_progress(line);
    }

    fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::ApplyPrompt { trainer } => {
                tracing::debug!(%trainer, "apply-learning started");
                self.context.prompt_apply(&trainer);
            }
            Intent::ApplyConfirm { trainer } => {
                if self.context.confirm_apply(&trainer) {
                    tracing::debug!(%trainer, "bonus rank confirmed");
                }
            }
            Intent::Abandon { subject } => {
                tracing::debug!(%subject, "study abandoned");
                self.context.transition(&subject, Transition::Abandon);
            }
            Intent::Begin { category, subject } => {
                tracing::debug!(%subject, %category, "study started");
                self.context.transition(&subject, Transition::Begin);
            }
            Intent::Master { category, subject } => {
                tracing::debug!(%subject, %category, "study mastered");
                self.context.master(category, &subject);
            }
            Intent::Unparsed => {}
        }
    }

    fn record_progress(&mut self, line: &str) {
        // Precise path: the canonical sentence names category and subject
        let parsed = PROGRESS.captures(line).and_then(|c| {
            let category = c[1].parse::<Category>().ok()?;
            Some((category, normalize_name(&c[2])))
        });

        if let Some((category, subject)) = &parsed {
            if self.is_suppressed(Some(*category), subject) {
                tracing::debug!(%subject, %category, "skipping progress (regex match)");
                return;
            }
        }

        // Phrase path, longest phrase first
        let Some(idx) = find_ascii_ci(line, PROGRESS_ANCHOR) else {
            return;
        };
        let after = line[idx + PROGRESS_ANCHOR.len()..].trim();
        let Some((phrase, rest)) = self.phrases.longest_prefix(after) else {
            return;
        };

        let raw_subject = rest.trim_start().split('.').next().unwrap_or("").trim();
        let phrase_subject = normalize_name(raw_subject);
        if phrase_subject.is_empty() {
            return;
        }

        let (category, subject) = match parsed {
            Some((category, subject)) => (Some(category), subject),
            None => (phrase.category(), phrase_subject),
        };

        if self.is_suppressed(category, &subject) {
            tracing::debug!(%subject, ?category, "skipping progress (phrase match)");
            return;
        }

        let label = match category {
            Some(category) => format!("{} {} ({})", phrase.label_prefix(), raw_subject, category),
            None => format!("{} {}", phrase.label_prefix(), raw_subject),
        };

        let entry = self
            .entries
            .entry((subject, category))
            .or_insert_with(|| StudyEntry {
                label: String::new(),
                subject: raw_subject.to_string(),
                category,
                count: 0,
            });
        entry.label = label;
        entry.subject = raw_subject.to_string();
        entry.count += 1;
    }

    fn is_suppressed(&self, category: Option<Category>, subject: &str) -> bool {
        if self.context.is_abandoned(subject) {
            return true;
        }
        category.is_some_and(|c| self.context.is_mastered(c, subject))
    }

    /// Finish the scan: attach bonuses and drop studies mastered at any
    /// point, including after their progress lines.
    pub fn finish(self) -> StudyReport {
        let mut counts: BTreeMap<String, StudyCount> = BTreeMap::new();

        for ((subject, category), entry) in self.entries {
            if category.is_some_and(|c| self.context.is_mastered(c, &subject)) {
                continue;
            }
            let bonus = self.context.bonus_for(&subject);
            let slot = counts.entry(entry.label).or_default();
            slot.base += entry.count;
            slot.bonus = slot.bonus.max(bonus);
        }

        StudyReport {
            counts,
            context: self.context,
        }
    }
}

/// Run the tracker over files already sorted oldest first.
pub fn track_study(files: &[LogFile], phrases: &StudyPhraseTable) -> StudyReport {
    let mut tracker = StudyTracker::new(phrases);
    for file in files {
        for line in file.content.lines() {
            tracker.feed_line(line);
        }
    }
    tracker.finish()
}
