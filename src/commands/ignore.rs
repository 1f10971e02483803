//! Ignore subcommands handler

use anyhow::Result;

use super::open_store;

#[cfg(not(tarpaulin_include))]
pub fn handle_list(character: &str) -> Result<()> {
    let (_, store) = open_store()?;
    let entry = store.require(character)?;
    if entry.ignored.is_empty() {
        println!("No ignored study entries for '{}'", character);
    }
    for label in &entry.ignored {
        println!("{}", label);
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_add(character: &str, label: &str) -> Result<()> {
    let (_, mut store) = open_store()?;
    let known = store
        .require(character)?
        .creatures
        .contains_key(label);
    if store.ignore(character, label)? {
        store.save()?;
        println!("Ignoring: {}", label);
        if !known {
            eprintln!("Note: '{}' is not among the stored study entries", label);
        }
    } else {
        println!("Already ignored: {}", label);
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_remove(character: &str, label: &str) -> Result<()> {
    let (_, mut store) = open_store()?;
    if store.unignore(character, label)? {
        store.save()?;
        println!("No longer ignoring: {}", label);
    } else {
        println!("'{}' was not ignored", label);
    }
    Ok(())
}
