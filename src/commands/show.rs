//! Show command handler

use anyhow::Result;

use super::{format_counts, open_store};

/// Print the stored rank and study counts of a character.
#[cfg(not(tarpaulin_include))]
pub fn handle(character: &str) -> Result<()> {
    let (_, store) = open_store()?;
    let entry = store.require(character)?;

    if entry.ranks.is_empty() && entry.creatures.is_empty() {
        println!(
            "No results stored for '{}'. Run: rankscan scan {}",
            character, character
        );
        return Ok(());
    }

    print!("{}", format_counts(&entry.ranks, entry.visible_creatures()));
    let hidden = entry.creatures.len() - entry.visible_creatures().count();
    if hidden > 0 {
        println!("({} ignored study entr{} hidden)", hidden, if hidden == 1 { "y" } else { "ies" });
    }
    Ok(())
}
