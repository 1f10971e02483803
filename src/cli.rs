//! CLI definitions for rankscan
//!
//! The clap structure lives apart from main.rs so tests can parse argument
//! vectors without running any command.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

use rankscan::TimeWindow;

/// Build clap styles for help output.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "rankscan")]
#[command(about = "Count trainer ranks, study progress and coins from game logs")]
#[command(
    long_about = "rankscan reads folders of game session logs and derives progress statistics
for a character: rank counts per trainer, creature study progress (ways,
movements, essence) with bonus ranks, and coins recovered from skinning.

QUICK START:
    rankscan config init                 Write default config and empty tables
    rankscan character add Mira          Register a character
    rankscan folder add Mira ~/Logs      Assign a log folder
    rankscan scan Mira                   Scan all of Mira's folders
    rankscan export Mira -o mira.csv     Export the stored results

Phrase tables live in the config directory (~/.config/rankscan, or
$RANKSCAN_HOME): rankmessages.txt, trainers.txt and specialphrases.txt."
)]
#[command(version = crate::version_string())]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a character's log folders
    #[command(long_about = "Scan a character's log folders and store the results.

Every folder is scanned on a pool of worker threads and the results are
merged into a fresh aggregate. Rank and study counts replace the stored
ones; the ignore list is kept. If any folder fails, the successful ones
are still printed and saved, and the command exits with an error.

EXAMPLES:
    rankscan scan Mira                       All assigned folders
    rankscan scan Mira --folder ~/Logs/old   Only the given folder
    rankscan scan Mira --since 3h            Coins from the last 3 hours
    rankscan scan Mira --json                Machine-readable output")]
    Scan {
        /// Character name
        character: String,
        /// Scan these folders instead of the assigned ones
        #[arg(long = "folder", value_name = "DIR")]
        folders: Vec<PathBuf>,
        /// Only count coins from logs modified within this window
        #[arg(long, value_enum, value_name = "WINDOW")]
        since: Option<TimeWindow>,
        /// Print the aggregate as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the stored results for a character
    Show {
        /// Character name
        character: String,
    },

    /// Export stored results as Trainer,Ranks CSV
    #[command(long_about = "Export a character's stored results as CSV.

Rows for trainer ranks come first, then the visible study entries.
Study counts are written as N, or N (M) when bonus ranks were earned.

EXAMPLES:
    rankscan export Mira               Write CSV to stdout
    rankscan export Mira -o mira.csv   Write CSV to a file")]
    Export {
        /// Character name
        character: String,
        /// Output file (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List log files containing a phrase
    Search {
        /// Character name
        character: String,
        /// Literal, case-sensitive phrase to look for
        phrase: String,
    },

    /// Manage characters
    #[command(subcommand)]
    Character(CharacterCommands),

    /// Manage a character's log folders
    #[command(subcommand)]
    Folder(FolderCommands),

    /// Hide or show study entries
    #[command(subcommand)]
    Ignore(IgnoreCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum CharacterCommands {
    /// List characters
    List,
    /// Add a character
    Add {
        /// Character name
        name: String,
    },
    /// Remove a character and its stored results
    Remove {
        /// Character name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum FolderCommands {
    /// List a character's folders
    List {
        /// Character name
        character: String,
    },
    /// Assign a log folder
    Add {
        /// Character name
        character: String,
        /// Log folder
        folder: PathBuf,
    },
    /// Unassign a log folder
    Remove {
        /// Character name
        character: String,
        /// Log folder
        folder: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum IgnoreCommands {
    /// List hidden study entries
    List {
        /// Character name
        character: String,
    },
    /// Hide a study entry from output and export
    Add {
        /// Character name
        character: String,
        /// Study label, exactly as shown by `rankscan show`
        label: String,
    },
    /// Show a hidden study entry again
    Remove {
        /// Character name
        character: String,
        /// Study label
        label: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Print the configuration, table and store paths
    Path,
    /// Write the default configuration and empty phrase tables
    #[command(long_about = "Write the default configuration and empty phrase tables.

Existing files are left untouched. Fill rankmessages.txt and trainers.txt
with one trigger phrase and its trainer per line (same line numbers), and
specialphrases.txt with one study phrase per line.

EXAMPLE:
    rankscan config init")]
    Init,
}
