//! Per-scan study state.

use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use super::Category;

static NAME_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s'-]").expect("valid name regex"));

/// Canonical key for a creature or trainer name.
///
/// Trims, drops punctuation other than apostrophes and hyphens, and
/// lowercases, so "the Giant Rat!" and "the giant rat" share state.
pub fn normalize_name(name: &str) -> String {
    NAME_NOISE.replace_all(name.trim(), "").to_lowercase()
}

/// Study state of a single subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectState {
    #[default]
    Unset,
    Active,
    Abandoned,
}

/// Named transitions of the subject state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// "You begin studying the ... of the X."
    Begin,
    /// "You abandon your study of the X."
    Abandon,
}

impl SubjectState {
    /// Both transitions are accepted from every state; the latest wins.
    pub fn apply(self, transition: Transition) -> SubjectState {
        match transition {
            Transition::Begin => SubjectState::Active,
            Transition::Abandon => SubjectState::Abandoned,
        }
    }
}

/// Subjects whose study has been mastered, per category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExclusionSet {
    ways: BTreeSet<String>,
    movements: BTreeSet<String>,
    essence: BTreeSet<String>,
}

impl ExclusionSet {
    fn set(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Ways => &self.ways,
            Category::Movements => &self.movements,
            Category::Essence => &self.essence,
        }
    }

    fn set_mut(&mut self, category: Category) -> &mut BTreeSet<String> {
        match category {
            Category::Ways => &mut self.ways,
            Category::Movements => &mut self.movements,
            Category::Essence => &mut self.essence,
        }
    }

    /// Returns true if the subject was not already excluded.
    pub fn insert(&mut self, category: Category, subject: &str) -> bool {
        self.set_mut(category).insert(subject.to_string())
    }

    pub fn contains(&self, category: Category, subject: &str) -> bool {
        self.set(category).contains(subject)
    }
}

/// All mutable state of one study scan.
///
/// Threaded through the tracker and returned with the scan result; nothing
/// here outlives the scan that built it. Keys are normalized names.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanContext {
    subjects: BTreeMap<String, SubjectState>,
    exclusions: ExclusionSet,
    pending_apply: BTreeSet<String>,
    bonuses: BTreeMap<String, u64>,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject_state(&self, subject: &str) -> SubjectState {
        self.subjects.get(subject).copied().unwrap_or_default()
    }

    /// Apply a transition to a subject, creating it on first mention.
    pub fn transition(&mut self, subject: &str, transition: Transition) -> SubjectState {
        let state = self.subjects.entry(subject.to_string()).or_default();
        *state = state.apply(transition);
        *state
    }

    pub fn is_abandoned(&self, subject: &str) -> bool {
        self.subject_state(subject) == SubjectState::Abandoned
    }

    pub fn master(&mut self, category: Category, subject: &str) -> bool {
        self.exclusions.insert(category, subject)
    }

    pub fn is_mastered(&self, category: Category, subject: &str) -> bool {
        self.exclusions.contains(category, subject)
    }

    /// Record an apply-learning prompt for a trainer.
    pub fn prompt_apply(&mut self, trainer: &str) {
        self.pending_apply.insert(trainer.to_string());
    }

    /// Confirm an apply-learning exchange.
    ///
    /// Only a pending prompt for the same trainer turns into a bonus, and
    /// the prompt is consumed. Returns whether a bonus was granted.
    pub fn confirm_apply(&mut self, trainer: &str) -> bool {
        if !self.pending_apply.remove(trainer) {
            return false;
        }
        *self.bonuses.entry(trainer.to_string()).or_insert(0) += 1;
        true
    }

    pub fn is_pending(&self, trainer: &str) -> bool {
        self.pending_apply.contains(trainer)
    }

    pub fn bonus_for(&self, name: &str) -> u64 {
        self.bonuses.get(name).copied().unwrap_or(0)
    }
}
