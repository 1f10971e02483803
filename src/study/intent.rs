//! Recognition of state-changing study lines.
//!
//! Each intent has a cheap substring anchor checked on the lowercased line
//! and a regex that extracts the name. A line that hits an anchor is
//! consumed even when the regex fails to capture a name.

use regex::Regex;
use std::sync::LazyLock;

use super::context::normalize_name;
use super::Category;

static APPLY_PROMPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)apply some of your learning to (.+?)['’]s lessons").expect("valid regex")
});

static APPLY_CONFIRM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)much more of (.+?)['’]s teachings").expect("valid regex")
});

static ABANDON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)you abandon your study of the (.+?)\.").expect("valid regex")
});

static BEGIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)you begin studying the (ways|movements|essence) of the (.+?)\.")
        .expect("valid regex")
});

static MASTER_MOVEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)you learn to fight the (.+?) more effectively").expect("valid regex")
});

static MASTER_WAYS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)you learn to befriend the (.+?)\.").expect("valid regex")
});

static MASTER_ESSENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)you learn to assume the form of the (.+?)\.").expect("valid regex")
});

/// What a state-changing line asks for. Names are normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ApplyPrompt { trainer: String },
    ApplyConfirm { trainer: String },
    Abandon { subject: String },
    Begin { category: Category, subject: String },
    Master { category: Category, subject: String },
    /// Anchor matched but no name could be extracted
    Unparsed,
}

fn capture(re: &Regex, line: &str, group: usize) -> Option<String> {
    re.captures(line)
        .and_then(|c| c.get(group))
        .map(|m| normalize_name(m.as_str()))
}

fn or_unparsed(name: Option<String>, build: impl FnOnce(String) -> Intent) -> Intent {
    name.map(build).unwrap_or(Intent::Unparsed)
}

/// Classify a line, in priority order. `None` means the line changes no
/// study state and should go on to progress matching.
///
/// `low` is the lowercased form of `line`.
pub fn recognize(line: &str, low: &str) -> Option<Intent> {
    if low.contains("would you like to apply some of your learning to")
        && (low.contains("’s lessons") || low.contains("'s lessons"))
    {
        return Some(or_unparsed(capture(&APPLY_PROMPT, line, 1), |trainer| {
            Intent::ApplyPrompt { trainer }
        }));
    }

    if low.contains("congratulations") && low.contains("you should now understand much more of") {
        return Some(or_unparsed(capture(&APPLY_CONFIRM, line, 1), |trainer| {
            Intent::ApplyConfirm { trainer }
        }));
    }

    if low.contains("you abandon your study of the") {
        return Some(or_unparsed(capture(&ABANDON, line, 1), |subject| {
            Intent::Abandon { subject }
        }));
    }

    for category in Category::ALL {
        let anchor = format!("you begin studying the {} of the", category);
        if low.contains(&anchor) {
            return Some(match BEGIN.captures(line) {
                Some(c) => Intent::Begin {
                    category: c[1].parse().unwrap_or(category),
                    subject: normalize_name(&c[2]),
                },
                None => Intent::Unparsed,
            });
        }
    }

    if low.contains("you learn to fight the") && low.contains("more effectively") {
        return Some(or_unparsed(capture(&MASTER_MOVEMENTS, line, 1), |subject| {
            Intent::Master {
                category: Category::Movements,
                subject,
            }
        }));
    }

    if low.contains("you learn to befriend the") {
        return Some(or_unparsed(capture(&MASTER_WAYS, line, 1), |subject| {
            Intent::Master {
                category: Category::Ways,
                subject,
            }
        }));
    }

    if low.contains("you learn to assume the form of the") {
        return Some(or_unparsed(capture(&MASTER_ESSENCE, line, 1), |subject| {
            Intent::Master {
                category: Category::Essence,
                subject,
            }
        }));
    }

    None
}
