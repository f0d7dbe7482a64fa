//! gadget-shelf CLI
//!
//! Command-line front end for browsing and editing the Doraemon gadget catalog.

mod cli_types;
mod commands;
mod error;
mod session;
mod spinner;

use std::io::Write;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{CacheAction, Cli, Commands, ConfigAction};
use commands::browse::{run_categories, run_list, run_show};
use commands::cache::{run_cache_clear, run_cache_path, run_cache_show};
use commands::config::{run_config_path, run_config_setup, run_config_show};
use commands::edit::{run_add, run_edit, run_remove};
use commands::export::run_export;
use commands::status::run_status;
use error::CliError;
use session::GlobalArgs;

const CRATES: &[&str] = &["gadget_shelf_cli", "gadget_shelf_sync", "gadget_shelf_catalog"];

/// Emit an empty info line.
pub(crate) fn log_blank() {
    log::info!("");
}

/// Install the logger. `RUST_LOG` overrides the level picked from the flags.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = std::iter::once("warn".to_string())
        .chain(CRATES.iter().map(|c| format!("{}={}", c, level)))
        .collect::<Vec<_>>()
        .join(",");

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter));
    builder.target(env_logger::Target::Stdout);
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let args = GlobalArgs {
        quiet: cli.quiet,
        cache_dir: cli.cache_dir,
        seed: cli.seed,
        password: cli.password,
    };

    match cli.command {
        Commands::List { category, search } => run_list(&args, category, search),
        Commands::Show { id } => run_show(&args, id),
        Commands::Categories => run_categories(&args),
        Commands::Add { item } => run_add(&args, item),
        Commands::Edit { id, item } => run_edit(&args, id, item),
        Commands::Remove { id } => run_remove(&args, id),
        Commands::Status => run_status(&args),
        Commands::Cache { action } => match action {
            CacheAction::Show => run_cache_show(&args),
            CacheAction::Clear => run_cache_clear(&args),
            CacheAction::Path => run_cache_path(&args),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(),
            ConfigAction::Setup => run_config_setup(),
            ConfigAction::Path => run_config_path(),
        },
        Commands::Export { file } => run_export(&args, &file),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}
