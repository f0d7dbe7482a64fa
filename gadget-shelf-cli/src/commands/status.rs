use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gadget_shelf_sync::SyncConfig;

use crate::error::CliError;
use crate::session::{GlobalArgs, open, print_sync_status, runtime};

/// Show where the catalog would sync to, then load it and report the outcome.
pub(crate) fn run_status(args: &GlobalArgs) -> Result<(), CliError> {
    let config = SyncConfig::load();

    log::info!("{}", "Gadget Shelf Status".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();
    log::info!(
        "  {} {}",
        "Remote:".if_supports_color(Stdout, |t| t.cyan()),
        config.api_url,
    );
    log::info!(
        "  {} {}",
        "Write access:".if_supports_color(Stdout, |t| t.cyan()),
        if config.can_push() {
            "token configured".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "read-only (local saves only)"
                .if_supports_color(Stdout, |t| t.yellow())
                .to_string()
        },
    );

    let rt = runtime()?;
    let controller = rt.block_on(open(args, config))?;

    log::info!(
        "  {} {}",
        "Document:".if_supports_color(Stdout, |t| t.cyan()),
        controller
            .document_id()
            .unwrap_or_else(|| "none (created on first save)".to_string()),
    );
    log::info!(
        "  {} {}",
        "Cache:".if_supports_color(Stdout, |t| t.cyan()),
        controller.local().dir().display(),
    );
    log::info!(
        "  {} {}",
        "Items:".if_supports_color(Stdout, |t| t.cyan()),
        controller.collection().len(),
    );

    crate::log_blank();
    if controller.current_sync_status().is_idle() {
        log::info!(
            "{}",
            "Loaded without contacting the remote".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    print_sync_status(controller.current_sync_status());
    Ok(())
}
