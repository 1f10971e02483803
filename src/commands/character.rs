//! Character subcommands handler

use anyhow::{bail, Result};

use super::open_store;

/// List all characters with their folder count.
#[cfg(not(tarpaulin_include))]
pub fn handle_list() -> Result<()> {
    let (_, store) = open_store()?;
    let names: Vec<&str> = store.names().collect();
    if names.is_empty() {
        println!("No characters yet. Add one with: rankscan character add <NAME>");
        return Ok(());
    }
    for name in names {
        let folders = store.get(name).map(|c| c.folders.len()).unwrap_or(0);
        println!("{} ({} folder{})", name, folders, if folders == 1 { "" } else { "s" });
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_add(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Character name must not be empty");
    }
    let (_, mut store) = open_store()?;
    if store.add_character(name) {
        store.save()?;
        println!("Added character: {}", name);
    } else {
        println!("Character '{}' already exists", name);
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_remove(name: &str) -> Result<()> {
    let (_, mut store) = open_store()?;
    if store.remove_character(name) {
        store.save()?;
        println!("Removed character: {}", name);
        Ok(())
    } else {
        bail!("Unknown character '{}'", name)
    }
}
