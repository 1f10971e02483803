//! Trigger and study phrase tables.
//!
//! Three plain-text files drive the engine. The trigger phrase and trigger
//! label files are parallel lists (line N of one names line N of the
//! other) and are validated before any log is read. The study phrase file
//! lists the openings of progress sentences.

use std::path::Path;

use crate::config::TablesConfig;
use crate::error::TableError;
use crate::reader::{read_text, Encoding};

/// Read a table file: one trimmed entry per line, blank lines dropped.
pub fn read_entries(path: &Path, encodings: &[Encoding]) -> Result<Vec<String>, TableError> {
    if !path.exists() {
        return Err(TableError::Missing {
            path: path.to_path_buf(),
        });
    }

    let text = read_text(path, encodings)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// One trigger phrase and the trainer it trains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub phrase: String,
    pub label: String,
}

/// Ordered phrase to label mapping for rank counting.
#[derive(Debug, Clone, Default)]
pub struct TriggerTable {
    triggers: Vec<Trigger>,
}

impl TriggerTable {
    /// Pair up phrases and labels, refusing lists of different length.
    pub fn new(phrases: Vec<String>, labels: Vec<String>) -> Result<Self, TableError> {
        Self::with_sources(phrases, labels, "trigger phrases", "trigger labels")
    }

    fn with_sources(
        phrases: Vec<String>,
        labels: Vec<String>,
        phrases_path: &str,
        labels_path: &str,
    ) -> Result<Self, TableError> {
        if phrases.len() != labels.len() {
            return Err(TableError::LengthMismatch {
                phrases: phrases.len(),
                labels: labels.len(),
                phrases_path: phrases_path.to_string(),
                labels_path: labels_path.to_string(),
            });
        }

        let triggers = phrases
            .into_iter()
            .zip(labels)
            .map(|(phrase, label)| Trigger { phrase, label })
            .collect();
        Ok(Self { triggers })
    }

    /// Load and validate the phrase and label files.
    pub fn load(
        phrases_path: &Path,
        labels_path: &Path,
        encodings: &[Encoding],
    ) -> Result<Self, TableError> {
        let phrases = read_entries(phrases_path, encodings)?;
        let labels = read_entries(labels_path, encodings)?;
        Self::with_sources(
            phrases,
            labels,
            &phrases_path.display().to_string(),
            &labels_path.display().to_string(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.iter()
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

/// A study phrase with its precomputed lowercase form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyPhrase {
    pub text: String,
    lower: String,
}

impl StudyPhrase {
    /// The first four words, used as the label prefix.
    pub fn label_prefix(&self) -> String {
        self.text.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
    }

    /// The study category the phrase names, if any.
    pub fn category(&self) -> Option<crate::study::Category> {
        crate::study::Category::ALL
            .into_iter()
            .find(|c| self.lower.contains(c.as_str()))
    }
}

/// Study phrases ordered longest first.
#[derive(Debug, Clone, Default)]
pub struct StudyPhraseTable {
    phrases: Vec<StudyPhrase>,
}

impl StudyPhraseTable {
    /// Build the table: trailing periods stripped, empties dropped, then a
    /// stable sort by character length, longest first.
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases: Vec<StudyPhrase> = raw
            .into_iter()
            .map(|p| p.as_ref().trim().trim_end_matches('.').trim_end().to_string())
            .filter(|p| !p.is_empty())
            .map(|text| StudyPhrase {
                lower: text.to_lowercase(),
                text,
            })
            .collect();
        phrases.sort_by(|a, b| b.text.chars().count().cmp(&a.text.chars().count()));
        Self { phrases }
    }

    pub fn load(path: &Path, encodings: &[Encoding]) -> Result<Self, TableError> {
        Ok(Self::new(read_entries(path, encodings)?))
    }

    pub fn phrases(&self) -> &[StudyPhrase] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// The longest phrase that case-insensitively prefixes `text`, with the
    /// remainder of `text` after it.
    pub fn longest_prefix<'t>(&self, text: &'t str) -> Option<(&StudyPhrase, &'t str)> {
        self.phrases
            .iter()
            .find_map(|phrase| strip_prefix_ci(text, &phrase.lower).map(|rest| (phrase, rest)))
    }
}

/// Case-insensitive `strip_prefix` that returns a slice of the original text.
///
/// `prefix` must already be lowercase. Comparison is char by char so the
/// byte offset stays valid for text whose lowercase form changes length.
fn strip_prefix_ci<'t>(text: &'t str, prefix: &str) -> Option<&'t str> {
    let mut expected = prefix.chars();
    let mut pending = expected.next();
    let mut end = 0;

    for (idx, ch) in text.char_indices() {
        let Some(want) = pending else {
            break;
        };
        let mut lower = ch.to_lowercase();
        if lower.len() != 1 || lower.next() != Some(want) {
            return None;
        }
        end = idx + ch.len_utf8();
        pending = expected.next();
    }

    if pending.is_some() {
        return None;
    }
    Some(&text[end..])
}

/// All three tables, loaded together before a scan starts.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub triggers: TriggerTable,
    pub study: StudyPhraseTable,
}

impl Tables {
    /// Load every table file named by the config.
    ///
    /// Fails on a trigger/label length mismatch so no scan runs with a
    /// partial mapping.
    pub fn load(
        config: &TablesConfig,
        base_dir: &Path,
        encodings: &[Encoding],
    ) -> Result<Self, TableError> {
        let triggers = TriggerTable::load(
            &config.resolve(base_dir, &config.trigger_phrases),
            &config.resolve(base_dir, &config.trigger_labels),
            encodings,
        )?;
        let study =
            StudyPhraseTable::load(&config.resolve(base_dir, &config.study_phrases), encodings)?;

        tracing::debug!(
            triggers = triggers.len(),
            study_phrases = study.len(),
            "loaded phrase tables"
        );
        Ok(Self { triggers, study })
    }
}
