//! Config subcommands handler

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use rankscan::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    print!("{}", toml_str);
    Ok(())
}

/// Print where the config, tables and store live.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    let config = Config::load()?;
    let base_dir = Config::config_dir()?;
    let [phrases, labels, study] = config.table_paths(&base_dir);

    println!("config:          {}", Config::config_path()?.display());
    println!("trigger phrases: {}", phrases.display());
    println!("trigger labels:  {}", labels.display());
    println!("study phrases:   {}", study.display());
    println!("characters:      {}", config.characters_path()?.display());
    println!("error log:       {}", config.error_log_path()?.display());
    Ok(())
}

/// Write the default config and empty table files, keeping existing ones.
#[cfg(not(tarpaulin_include))]
pub fn handle_init() -> Result<()> {
    let config_path = Config::config_path()?;
    let base_dir = Config::config_dir()?;
    let config = if config_path.exists() {
        println!("Keeping existing {}", config_path.display());
        Config::load()?
    } else {
        let config = Config::default();
        config.save()?;
        println!("Wrote {}", config_path.display());
        config
    };

    for created in init_tables(&config, &base_dir)? {
        println!("Wrote {}", created.display());
    }
    Ok(())
}

/// Create any missing table file as an empty file. Returns the new paths.
pub(crate) fn init_tables(config: &Config, base_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for path in config.table_paths(base_dir) {
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        fs::write(&path, "").with_context(|| format!("Failed to write table file: {:?}", path))?;
        created.push(path);
    }
    Ok(created)
}
