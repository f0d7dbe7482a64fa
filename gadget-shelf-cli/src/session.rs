//! Wiring a controller for one CLI invocation.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gadget_shelf_catalog::load_seed;
use gadget_shelf_sync::{FileCache, GistClient, SyncConfig, SyncController, SyncStatus};

use crate::error::CliError;
use crate::spinner::spinner;

pub(crate) type Controller = SyncController<GistClient, FileCache>;

/// Flags that apply to every command.
#[derive(Clone, Default)]
pub(crate) struct GlobalArgs {
    pub quiet: bool,
    pub cache_dir: Option<PathBuf>,
    pub seed: Option<PathBuf>,
    pub password: Option<String>,
}

impl GlobalArgs {
    pub(crate) fn cache(&self) -> Result<FileCache, CliError> {
        match &self.cache_dir {
            Some(dir) => Ok(FileCache::new(dir.clone())),
            None => Ok(FileCache::in_data_dir()?),
        }
    }
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

/// Build a controller for `config` without loading anything yet.
pub(crate) fn build_controller(
    args: &GlobalArgs,
    config: SyncConfig,
) -> Result<Controller, CliError> {
    let remote = GistClient::new(&config)?;
    let controller = SyncController::new(remote, args.cache()?, config);

    match &args.seed {
        Some(path) => {
            let seed = load_seed(path)?;
            log::debug!("Using {} seed items from {}", seed.len(), path.display());
            Ok(controller.with_defaults(seed))
        }
        None => Ok(controller),
    }
}

/// Build and initialize a controller, with a spinner while the remote loads.
pub(crate) async fn open(args: &GlobalArgs, config: SyncConfig) -> Result<Controller, CliError> {
    let mut controller = build_controller(args, config)?;

    let pb = spinner(args.quiet, "Loading catalog...");
    let result = controller.initialize().await.map(|_| ());
    pb.finish_and_clear();
    result?;

    Ok(controller)
}

/// Print the controller's last sync outcome, if there is one.
pub(crate) fn print_sync_status(status: &SyncStatus) {
    if status.is_idle() {
        return;
    }
    if status.is_error {
        log::warn!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            status.message,
        );
    } else {
        log::info!(
            "{} {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            status.message,
        );
    }
}
