//! Line eligibility rules shared by the rank counter and study parser.
//!
//! Logs interleave system messages with speech and emotes. Spoken lines
//! routinely quote trainer phrases, so they must never count.

use regex::Regex;
use std::sync::LazyLock;

/// Speech verbs that mark a line as somebody talking.
const SPEECH_MARKERS: &[&str] = &["says,", "growls,", "yells,", "ponders,", "thinks,"];

/// `[12:34:56]`, `12:34:56a >`, `[1:02:03] •` and similar prefixes.
static TIMESTAMP_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[?\d{1,2}:\d{2}:\d{2}\w?\]?\s*[•>:-]*\s*").expect("valid timestamp regex")
});

/// Whether a line must be left out of rank and study analysis.
///
/// Checked case-insensitively on the trimmed line: speech markers,
/// lines wrapped entirely in parentheses, and the `"):"` emote marker.
pub fn is_excluded(line: &str) -> bool {
    let low = line.trim().to_lowercase();

    if SPEECH_MARKERS.iter().any(|marker| low.contains(marker)) {
        return true;
    }
    if low.starts_with('(') && low.ends_with(')') {
        return true;
    }
    low.contains("):")
}

/// Remove a leading timestamp prefix, if present.
pub fn strip_timestamp(line: &str) -> &str {
    match TIMESTAMP_PREFIX.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}
