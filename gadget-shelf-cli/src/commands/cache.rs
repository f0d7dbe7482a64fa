use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gadget_shelf_sync::LocalStore;

use crate::error::CliError;
use crate::session::GlobalArgs;

/// Show what the local cache holds.
pub(crate) fn run_cache_show(args: &GlobalArgs) -> Result<(), CliError> {
    let cache = args.cache()?;

    log::info!(
        "{} {}",
        "Cache:".if_supports_color(Stdout, |t| t.bold()),
        cache.dir().display().if_supports_color(Stdout, |t| t.cyan()),
    );

    match cache.load() {
        Ok(Some(collection)) => log::info!("  Items: {}", collection.len()),
        Ok(None) => log::info!(
            "  Items: {}",
            "none cached".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        Err(e) => log::warn!(
            "  {} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        ),
    }

    match cache.load_document_id()? {
        Some(id) => log::info!("  Document: {}", id),
        None => log::info!(
            "  Document: {}",
            "none".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }

    Ok(())
}

/// Delete the cached items and document id.
pub(crate) fn run_cache_clear(args: &GlobalArgs) -> Result<(), CliError> {
    let cache = args.cache()?;
    cache.clear()?;
    log::info!(
        "{} Cache cleared ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        cache.dir().display(),
    );
    Ok(())
}

/// Print the cache directory.
pub(crate) fn run_cache_path(args: &GlobalArgs) -> Result<(), CliError> {
    log::info!("{}", args.cache()?.dir().display());
    Ok(())
}
