//! Study progression tracking.
//!
//! Characters study a creature's ways, movements or essence over many
//! sessions. Progress sentences only count while the study is live: an
//! abandoned study, or a category the character has already mastered for
//! that creature, contributes nothing. Trainers can additionally grant a
//! bonus rank through a two-step apply/confirm exchange.
//!
//! # Module Structure
//!
//! - [`context`] - per-scan state: subject states, exclusions, bonuses
//! - [`intent`] - recognition of state-changing lines
//! - [`tracker`] - the line by line state machine and its report

mod context;
mod intent;
mod tracker;

pub use context::{normalize_name, ExclusionSet, ScanContext, SubjectState, Transition};
pub use intent::{recognize, Intent};
pub use tracker::{track_study, StudyEntry, StudyReport, StudyTracker};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three study progressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ways,
    Movements,
    Essence,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Ways, Category::Movements, Category::Essence];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ways => "ways",
            Category::Movements => "movements",
            Category::Essence => "essence",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ways" => Ok(Category::Ways),
            "movements" => Ok(Category::Movements),
            "essence" => Ok(Category::Essence),
            other => Err(format!("unknown study category '{}'", other)),
        }
    }
}

/// Progress occurrences for one study label plus confirmed bonus ranks.
///
/// Rendered and stored as `base` or `base (bonus)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudyCount {
    pub base: u64,
    pub bonus: u64,
}

impl StudyCount {
    pub fn new(base: u64, bonus: u64) -> Self {
        Self { base, bonus }
    }
}

impl fmt::Display for StudyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bonus > 0 {
            write!(f, "{} ({})", self.base, self.bonus)
        } else {
            write!(f, "{}", self.base)
        }
    }
}

impl FromStr for StudyCount {
    type Err = String;

    /// Parse `"5"` or `"5 (1)"`; whitespace around the parts is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (base, bonus) = match s.split_once('(') {
            Some((base, rest)) => {
                let bonus = rest
                    .strip_suffix(')')
                    .ok_or_else(|| format!("unterminated bonus in '{}'", s))?;
                (base.trim(), Some(bonus.trim()))
            }
            None => (s, None),
        };

        let base = base
            .parse::<u64>()
            .map_err(|_| format!("invalid study count '{}'", s))?;
        let bonus = match bonus {
            Some(b) => b
                .parse::<u64>()
                .map_err(|_| format!("invalid bonus in '{}'", s))?,
            None => 0,
        };
        Ok(Self { base, bonus })
    }
}

impl TryFrom<String> for StudyCount {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StudyCount> for String {
    fn from(value: StudyCount) -> Self {
        value.to_string()
    }
}
