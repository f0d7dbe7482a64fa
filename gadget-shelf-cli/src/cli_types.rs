//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gadget-shelf")]
#[command(about = "Browse and edit the Doraemon gadget catalog", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for the local cache (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// YAML seed used instead of the built-in items when nothing else loads
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Admin secret for commands that change the catalog (prompted if absent)
    #[arg(long, global = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Item fields shared by `add` and `edit`. Everything is optional here so
/// `edit` can leave fields untouched; `add` checks the required ones.
#[derive(Args, Clone, Default)]
pub(crate) struct ItemArgs {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Category label (e.g., 时间道具)
    #[arg(long)]
    pub category: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Comma-separated feature list (replaces existing features)
    #[arg(long)]
    pub features: Option<String>,

    /// Season appearance as VALUE:EPISODE (repeatable, replaces existing appearances)
    #[arg(long = "season", value_name = "VALUE:EPISODE")]
    pub seasons: Vec<String>,

    /// Movie appearance as VALUE:YEAR (repeatable, replaces existing appearances)
    #[arg(long = "movie", value_name = "VALUE:YEAR")]
    pub movies: Vec<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List catalog items
    List {
        /// Only show items in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive search over name and description
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one item in full
    Show {
        /// Item id
        id: i64,
    },

    /// List known categories and how many items use each
    Categories,

    /// Add a new item
    Add {
        #[command(flatten)]
        item: ItemArgs,
    },

    /// Edit an existing item; unspecified fields keep their current value
    Edit {
        /// Item id
        id: i64,

        #[command(flatten)]
        item: ItemArgs,
    },

    /// Remove an item
    Remove {
        /// Item id
        id: i64,
    },

    /// Show configuration and the result of a fresh load
    Status,

    /// Manage the local cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Manage remote and admin configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Write the current catalog to a YAML file
    Export {
        /// Output path
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// Show what the local cache holds
    Show,

    /// Delete the cached items and document id
    Clear,

    /// Print the cache directory
    Path,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current configuration and where each value comes from
    Show,

    /// Interactively write the config file
    Setup,

    /// Print the config file path
    Path,
}
