//! rankscan - CLI entry point

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::sync::LazyLock;

use cli::{CharacterCommands, Cli, Commands, ConfigCommands, FolderCommands, IgnoreCommands};
use rankscan::{logging, Config};

static VERSION: LazyLock<String> = LazyLock::new(|| match option_env!("VERGEN_GIT_SHA") {
    Some(sha) if !sha.is_empty() && sha != "unknown" => {
        let short = sha.get(..7).unwrap_or(sha);
        format!("{} ({})", env!("CARGO_PKG_VERSION"), short)
    }
    _ => env!("CARGO_PKG_VERSION").to_string(),
});

/// Version shown by `--version`, with the git hash on dev builds.
pub(crate) fn version_string() -> &'static str {
    VERSION.as_str()
}

/// Record panics in the configured error log. Without a usable config the
/// default hook alone stays in place.
#[cfg(not(tarpaulin_include))]
fn install_crash_record() {
    match Config::load().and_then(|config| config.error_log_path()) {
        Ok(path) => logging::install_panic_hook(path),
        Err(e) => tracing::debug!("crash record disabled: {:#}", e),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    install_crash_record();

    match cli.command {
        Commands::Scan {
            character,
            folders,
            since,
            json,
        } => commands::scan::handle(&character, &folders, since, json),
        Commands::Show { character } => commands::show::handle(&character),
        Commands::Export { character, output } => {
            commands::export::handle(&character, output.as_deref())
        }
        Commands::Search { character, phrase } => commands::search::handle(&character, &phrase),
        Commands::Character(cmd) => match cmd {
            CharacterCommands::List => commands::character::handle_list(),
            CharacterCommands::Add { name } => commands::character::handle_add(&name),
            CharacterCommands::Remove { name } => commands::character::handle_remove(&name),
        },
        Commands::Folder(cmd) => match cmd {
            FolderCommands::List { character } => commands::folder::handle_list(&character),
            FolderCommands::Add { character, folder } => {
                commands::folder::handle_add(&character, &folder)
            }
            FolderCommands::Remove { character, folder } => {
                commands::folder::handle_remove(&character, &folder)
            }
        },
        Commands::Ignore(cmd) => match cmd {
            IgnoreCommands::List { character } => commands::ignore::handle_list(&character),
            IgnoreCommands::Add { character, label } => {
                commands::ignore::handle_add(&character, &label)
            }
            IgnoreCommands::Remove { character, label } => {
                commands::ignore::handle_remove(&character, &label)
            }
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init => commands::config::handle_init(),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
