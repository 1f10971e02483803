//! Search command handler

use anyhow::{bail, Result};

use rankscan::search::search_folders;

use super::open_store;

/// List every log file in the character's folders that contains `phrase`.
#[cfg(not(tarpaulin_include))]
pub fn handle(character: &str, phrase: &str) -> Result<()> {
    if phrase.is_empty() {
        bail!("Search phrase must not be empty");
    }

    let (config, store) = open_store()?;
    let folders = store.require(character)?.folder_paths();
    if folders.is_empty() {
        bail!("Character '{}' has no folders assigned", character);
    }

    let matches = search_folders(&folders, phrase, &config.scan.encodings);
    if matches.is_empty() {
        println!("No log files contain {:?}", phrase);
        return Ok(());
    }
    for path in &matches {
        println!("{}", path.display());
    }
    Ok(())
}
