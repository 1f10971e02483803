//! `Trainer,Ranks` CSV export.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::study::StudyCount;

pub const CSV_HEADER: &str = "Trainer,Ranks";

/// Quote a field if it contains a comma, quote or newline.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Write rank rows followed by study rows.
///
/// Study counts are written in their display form, `N` or `N (M)`.
pub fn write_csv<'a, W, I>(
    out: &mut W,
    ranks: &BTreeMap<String, u64>,
    creatures: I,
) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a String, &'a StudyCount)>,
{
    writeln!(out, "{}", CSV_HEADER)?;
    for (label, count) in ranks {
        writeln!(out, "{},{}", csv_field(label), count)?;
    }
    for (label, count) in creatures {
        writeln!(out, "{},{}", csv_field(label), csv_field(&count.to_string()))?;
    }
    Ok(())
}

/// Render the CSV into a string.
pub fn to_csv_string<'a, I>(ranks: &BTreeMap<String, u64>, creatures: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a StudyCount)>,
{
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_csv(&mut buf, ranks, creatures);
    String::from_utf8_lossy(&buf).into_owned()
}
