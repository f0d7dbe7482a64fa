use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gadget_shelf_catalog::save_seed;
use gadget_shelf_sync::SyncConfig;

use crate::error::CliError;
use crate::session::{GlobalArgs, open, runtime};

/// Write the session's collection as a YAML seed.
pub(crate) fn run_export(args: &GlobalArgs, file: &Path) -> Result<(), CliError> {
    let rt = runtime()?;
    let controller = rt.block_on(open(args, SyncConfig::load()))?;

    save_seed(file, controller.collection())?;
    log::info!(
        "{} Exported {} items to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        controller.collection().len(),
        file.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
