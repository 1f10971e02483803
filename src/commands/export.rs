//! Export command handler

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rankscan::export::write_csv;

use super::open_store;

/// Write a character's stored results as CSV to a file or stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(character: &str, output: Option<&Path>) -> Result<()> {
    let (_, store) = open_store()?;
    let entry = store.require(character)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create export file: {:?}", path))?;
            let mut writer = BufWriter::new(file);
            write_csv(&mut writer, &entry.ranks, entry.visible_creatures())
                .and_then(|_| writer.flush())
                .with_context(|| format!("Failed to write export file: {:?}", path))?;
            eprintln!("Exported {} to {}", character, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_csv(&mut lock, &entry.ranks, entry.visible_creatures())
                .context("Failed to write CSV")?;
        }
    }
    Ok(())
}
