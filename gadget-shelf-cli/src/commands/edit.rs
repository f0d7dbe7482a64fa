use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gadget_shelf_catalog::{Appearance, ItemFields};
use gadget_shelf_sync::{EditTarget, Mutation, SyncConfig, SyncError};

use crate::cli_types::ItemArgs;
use crate::error::CliError;
use crate::session::{GlobalArgs, open, print_sync_status, runtime};

/// Add a new item.
pub(crate) fn run_add(args: &GlobalArgs, item: ItemArgs) -> Result<(), CliError> {
    let fields = new_fields(&item)?;
    let config = SyncConfig::load();
    require_admin(&config, args.password.as_deref())?;

    let rt = runtime()?;
    rt.block_on(async {
        let mut controller = open(args, config).await?;
        controller.begin_edit(EditTarget::New)?;
        let collection = controller.apply_mutation(Mutation::Insert(fields)).await?;

        if let Some(added) = collection.items().last() {
            log::info!(
                "{} Added {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                added.name.if_supports_color(Stdout, |t| t.bold()),
                format!("#{}", added.id).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        print_sync_status(controller.current_sync_status());
        Ok::<_, CliError>(())
    })
}

/// Edit an existing item, keeping every field not given on the command line.
pub(crate) fn run_edit(args: &GlobalArgs, id: i64, item: ItemArgs) -> Result<(), CliError> {
    let config = SyncConfig::load();
    require_admin(&config, args.password.as_deref())?;

    let rt = runtime()?;
    rt.block_on(async {
        let mut controller = open(args, config).await?;
        controller.begin_edit(EditTarget::Existing(id))?;

        let current = controller
            .collection()
            .get(id)
            .map(|i| i.fields())
            .ok_or(SyncError::ItemNotFound(id))?;
        let fields = match merge_fields(current, &item) {
            Ok(fields) => fields,
            Err(e) => {
                controller.cancel_edit();
                return Err(e);
            }
        };

        controller
            .apply_mutation(Mutation::Update { id, fields })
            .await?;
        log::info!(
            "{} Updated {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            format!("#{}", id).if_supports_color(Stdout, |t| t.dimmed()),
        );
        print_sync_status(controller.current_sync_status());
        Ok::<_, CliError>(())
    })
}

/// Remove an item. Removing an unknown id is a no-op.
pub(crate) fn run_remove(args: &GlobalArgs, id: i64) -> Result<(), CliError> {
    let config = SyncConfig::load();
    require_admin(&config, args.password.as_deref())?;

    let rt = runtime()?;
    rt.block_on(async {
        let mut controller = open(args, config).await?;
        let existed = controller.collection().get(id).is_some();
        controller.apply_mutation(Mutation::Delete(id)).await?;

        if existed {
            log::info!(
                "{} Removed {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                format!("#{}", id).if_supports_color(Stdout, |t| t.dimmed()),
            );
        } else {
            log::warn!("No item with id {}; nothing removed", id);
        }
        print_sync_status(controller.current_sync_status());
        Ok::<_, CliError>(())
    })
}

/// Check the admin secret from `--password`, or prompt for it.
fn require_admin(config: &SyncConfig, password: Option<&str>) -> Result<(), CliError> {
    let input = match password {
        Some(p) => p.to_string(),
        None => prompt_password()?,
    };
    if config.verify_admin(&input) {
        Ok(())
    } else {
        Err(CliError::AdminDenied)
    }
}

fn prompt_password() -> Result<String, CliError> {
    print!("Admin password: ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Fields for a new item. Name and category are required.
pub(crate) fn new_fields(args: &ItemArgs) -> Result<ItemFields, CliError> {
    let fields = merge_fields(ItemFields::default(), args)?;
    if fields.category.is_empty() {
        return Err(CliError::invalid_argument("--category is required"));
    }
    Ok(fields)
}

/// Overlay the given arguments on `current`. Appearances are replaced as a
/// whole when any `--season` or `--movie` is given.
pub(crate) fn merge_fields(current: ItemFields, args: &ItemArgs) -> Result<ItemFields, CliError> {
    let mut fields = current;
    if let Some(name) = &args.name {
        fields.name = name.clone();
    }
    if let Some(category) = &args.category {
        fields.category = category.clone();
    }
    if let Some(description) = &args.description {
        fields.description = description.clone();
    }
    if let Some(image) = &args.image {
        fields.image = image.clone();
    }
    if let Some(features) = &args.features {
        fields.features = ItemFields::parse_features(features);
    }
    if !args.seasons.is_empty() || !args.movies.is_empty() {
        fields.appearances = parse_appearances(&args.seasons, &args.movies)?;
    }

    let fields = fields.normalized();
    if fields.name.is_empty() {
        return Err(CliError::invalid_argument("--name must not be empty"));
    }
    Ok(fields)
}

/// Seasons first, then movies, each in the order given.
pub(crate) fn parse_appearances(
    seasons: &[String],
    movies: &[String],
) -> Result<Vec<Appearance>, CliError> {
    let mut appearances = Vec::with_capacity(seasons.len() + movies.len());
    for raw in seasons {
        let (value, episode) = split_pair(raw, "--season", "VALUE:EPISODE")?;
        appearances.push(Appearance::season(value, episode));
    }
    for raw in movies {
        let (value, year) = split_pair(raw, "--movie", "VALUE:YEAR")?;
        appearances.push(Appearance::movie(value, year));
    }
    Ok(appearances)
}

fn split_pair<'a>(raw: &'a str, flag: &str, shape: &str) -> Result<(&'a str, &'a str), CliError> {
    let (value, detail) = raw.rsplit_once(':').ok_or_else(|| {
        CliError::invalid_argument(format!("{} expects {}, got '{}'", flag, shape, raw))
    })?;
    let (value, detail) = (value.trim(), detail.trim());
    if value.is_empty() || detail.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "{} expects {}, got '{}'",
            flag, shape, raw
        )));
    }
    Ok((value, detail))
}

#[cfg(test)]
#[path = "../tests/edit_tests.rs"]
mod tests;
