use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gadget_shelf_catalog::{Item, ItemFilter, KNOWN_CATEGORIES};
use gadget_shelf_sync::{SyncConfig, SyncError};

use super::truncate_str;
use crate::error::CliError;
use crate::session::{GlobalArgs, open, print_sync_status, runtime};

const DESCRIPTION_WIDTH: usize = 60;

/// Print the filtered item grid.
pub(crate) fn run_list(
    args: &GlobalArgs,
    category: Option<String>,
    search: Option<String>,
) -> Result<(), CliError> {
    let rt = runtime()?;
    let controller = rt.block_on(open(args, SyncConfig::load()))?;

    let mut filter = ItemFilter::new();
    if let Some(category) = category {
        filter = filter.with_category(category);
    }
    if let Some(search) = search {
        filter = filter.with_search(search);
    }

    let collection = controller.collection();
    let items = collection.filter(&filter);
    let stats = collection.stats(&filter);

    if items.is_empty() {
        log::info!(
            "{}",
            "No matching items.".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    for item in &items {
        print_item_line(item);
    }

    crate::log_blank();
    log::info!("Found {} items ({} total)", stats.shown, stats.total);
    print_sync_status(controller.current_sync_status());
    Ok(())
}

fn print_item_line(item: &Item) {
    log::info!(
        "  {} {} [{}]",
        format!("#{}", item.id).if_supports_color(Stdout, |t| t.dimmed()),
        item.name.if_supports_color(Stdout, |t| t.bold()),
        item.category.if_supports_color(Stdout, |t| t.cyan()),
    );
    if !item.description.is_empty() {
        log::info!("    {}", truncate_str(&item.description, DESCRIPTION_WIDTH));
    }
}

/// Print one item in full.
pub(crate) fn run_show(args: &GlobalArgs, id: i64) -> Result<(), CliError> {
    let rt = runtime()?;
    let controller = rt.block_on(open(args, SyncConfig::load()))?;

    let item = controller
        .collection()
        .get(id)
        .ok_or(SyncError::ItemNotFound(id))?;

    log::info!("{}", item.name.if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  {} {}",
        "Id:".if_supports_color(Stdout, |t| t.cyan()),
        item.id,
    );
    log::info!(
        "  {} {}",
        "Category:".if_supports_color(Stdout, |t| t.cyan()),
        item.category,
    );
    if !item.description.is_empty() {
        log::info!(
            "  {} {}",
            "Description:".if_supports_color(Stdout, |t| t.cyan()),
            item.description,
        );
    }
    if !item.image.is_empty() {
        log::info!(
            "  {} {}",
            "Image:".if_supports_color(Stdout, |t| t.cyan()),
            item.image,
        );
    }

    if !item.features.is_empty() {
        log::info!("  {}", "Features:".if_supports_color(Stdout, |t| t.cyan()));
        for feature in &item.features {
            log::info!("    - {}", feature);
        }
    }

    if !item.appearances.is_empty() {
        log::info!("  {}", "Appearances:".if_supports_color(Stdout, |t| t.cyan()));
        for appearance in &item.appearances {
            log::info!(
                "    - {} {}",
                appearance,
                format!("({})", appearance.kind()).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }

    Ok(())
}

/// Print the known category labels plus any others in use, with counts.
pub(crate) fn run_categories(args: &GlobalArgs) -> Result<(), CliError> {
    let rt = runtime()?;
    let controller = rt.block_on(open(args, SyncConfig::load()))?;
    let in_use = controller.collection().categories();

    let count_of = |label: &str| {
        in_use
            .iter()
            .find(|(c, _)| *c == label)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    };

    log::info!("{}", "Categories:".if_supports_color(Stdout, |t| t.bold()));
    for &label in KNOWN_CATEGORIES {
        let count = count_of(label);
        if count == 0 {
            log::info!(
                "  {} {}",
                label,
                "(0)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        } else {
            log::info!(
                "  {} {}",
                label.if_supports_color(Stdout, |t| t.cyan()),
                format!("({})", count),
            );
        }
    }

    let extra: Vec<_> = in_use
        .iter()
        .filter(|(c, _)| !KNOWN_CATEGORIES.contains(c))
        .collect();
    if !extra.is_empty() {
        crate::log_blank();
        log::info!(
            "{}",
            "Other labels in use:".if_supports_color(Stdout, |t| t.bold()),
        );
        for (label, count) in extra {
            let label = if label.is_empty() { "(none)" } else { *label };
            log::info!("  {} ({})", label.if_supports_color(Stdout, |t| t.yellow()), count);
        }
    }

    Ok(())
}
