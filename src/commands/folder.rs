//! Folder subcommands handler

use anyhow::{bail, Result};
use std::path::Path;

use super::open_store;

#[cfg(not(tarpaulin_include))]
pub fn handle_list(character: &str) -> Result<()> {
    let (_, store) = open_store()?;
    let entry = store.require(character)?;
    if entry.folders.is_empty() {
        println!("No folders assigned to '{}'", character);
    }
    for folder in &entry.folders {
        println!("{}", folder);
    }
    Ok(())
}

/// Assign a folder. Missing folders are accepted with a warning.
#[cfg(not(tarpaulin_include))]
pub fn handle_add(character: &str, folder: &Path) -> Result<()> {
    let (_, mut store) = open_store()?;
    if !folder.is_dir() {
        eprintln!("Warning: {} is not a directory (yet)", folder.display());
    }
    let folder = folder.to_string_lossy();
    if store.add_folder(character, &folder)? {
        store.save()?;
        println!("Added folder to {}: {}", character, folder);
    } else {
        println!("{} already has folder {}", character, folder);
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_remove(character: &str, folder: &Path) -> Result<()> {
    let (_, mut store) = open_store()?;
    let folder = folder.to_string_lossy();
    if store.remove_folder(character, &folder)? {
        store.save()?;
        println!("Removed folder from {}: {}", character, folder);
        Ok(())
    } else {
        bail!("{} has no folder {}", character, folder)
    }
}
