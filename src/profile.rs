//! Persisted characters: their log folders, last results and ignore list.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate::AggregateResult;
use crate::study::StudyCount;

/// One character as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Log folders, in the order they were added
    #[serde(default)]
    pub folders: Vec<String>,
    /// Rank counts from the last scan
    #[serde(default)]
    pub ranks: BTreeMap<String, u64>,
    /// Study counts from the last scan
    #[serde(default)]
    pub creatures: BTreeMap<String, StudyCount>,
    /// Study labels hidden from output
    #[serde(default)]
    pub ignored: BTreeSet<String>,
}

impl Character {
    pub fn folder_paths(&self) -> Vec<PathBuf> {
        self.folders.iter().map(PathBuf::from).collect()
    }

    /// Study entries not hidden by the ignore list
    pub fn visible_creatures(&self) -> impl Iterator<Item = (&String, &StudyCount)> {
        self.creatures
            .iter()
            .filter(move |(label, _)| !self.ignored.contains(*label))
    }
}

/// Character store backed by a JSON file
#[derive(Debug, Clone)]
pub struct CharacterStore {
    path: PathBuf,
    characters: BTreeMap<String, Character>,
}

impl CharacterStore {
    /// Load the store, starting empty if the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        let characters = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read character store: {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse character store: {:?}", path))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            characters,
        })
    }

    /// Write the store back to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let contents = serde_json::to_string_pretty(&self.characters)
            .context("Failed to serialize characters")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write character store: {:?}", self.path))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.characters.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters.get(name)
    }

    /// Look up a character, failing with a helpful message
    pub fn require(&self, name: &str) -> Result<&Character> {
        match self.characters.get(name) {
            Some(character) => Ok(character),
            None => bail!(
                "Unknown character '{}'. Add it with: rankscan character add {}",
                name,
                name
            ),
        }
    }

    fn require_mut(&mut self, name: &str) -> Result<&mut Character> {
        match self.characters.get_mut(name) {
            Some(character) => Ok(character),
            None => bail!(
                "Unknown character '{}'. Add it with: rankscan character add {}",
                name,
                name
            ),
        }
    }

    /// Add a character. Returns false if it already exists.
    pub fn add_character(&mut self, name: &str) -> bool {
        if self.characters.contains_key(name) {
            return false;
        }
        self.characters.insert(name.to_string(), Character::default());
        true
    }

    pub fn remove_character(&mut self, name: &str) -> bool {
        self.characters.remove(name).is_some()
    }

    /// Assign a folder. Returns false if the character already has it.
    pub fn add_folder(&mut self, name: &str, folder: &str) -> Result<bool> {
        let character = self.require_mut(name)?;
        if character.folders.iter().any(|f| f == folder) {
            return Ok(false);
        }
        character.folders.push(folder.to_string());
        Ok(true)
    }

    pub fn remove_folder(&mut self, name: &str, folder: &str) -> Result<bool> {
        let character = self.require_mut(name)?;
        let before = character.folders.len();
        character.folders.retain(|f| f != folder);
        Ok(character.folders.len() < before)
    }

    /// Hide a study label. Counts are kept.
    pub fn ignore(&mut self, name: &str, label: &str) -> Result<bool> {
        Ok(self.require_mut(name)?.ignored.insert(label.to_string()))
    }

    /// Show a previously hidden study label again
    pub fn unignore(&mut self, name: &str, label: &str) -> Result<bool> {
        Ok(self.require_mut(name)?.ignored.remove(label))
    }

    /// Replace the stored results with a fresh aggregate
    pub fn record_scan(&mut self, name: &str, aggregate: &AggregateResult) -> Result<()> {
        let character = self.require_mut(name)?;
        character.ranks = aggregate.ranks.clone();
        character.creatures = aggregate.creatures.clone();
        Ok(())
    }
}
