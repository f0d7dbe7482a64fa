use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gadget_shelf_sync::{ConfigSource, SyncConfig, config_path, config_sources, save_to_file};

use crate::error::CliError;

/// Show the first two characters of a secret.
pub(crate) fn mask_value(s: &str) -> String {
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        let head: String = s.chars().take(2).collect();
        format!("{}****", head)
    }
}

/// Show current configuration and where each value comes from.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = config_path();
    let sources = config_sources();
    let config = SyncConfig::load();

    log::info!(
        "{}",
        "Gadget Shelf Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => log::info!(
            "  Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => log::info!(
            "  Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  Config file: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
    crate::log_blank();

    let fields: [(&str, &ConfigSource, Option<String>); 5] = [
        ("token", &sources.token, config.token.as_deref().map(mask_value)),
        ("document_id", &sources.document_id, config.document_id.clone()),
        ("api_url", &sources.api_url, Some(config.api_url.clone())),
        ("file_name", &sources.file_name, Some(config.file_name.clone())),
        (
            "admin_secret",
            &sources.admin_secret,
            Some(mask_value(&config.admin_secret)),
        ),
    ];

    for (name, source, value) in &fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => log::info!(
                "  {} {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                v,
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
            None => log::info!(
                "  {} {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                "not set".if_supports_color(Stdout, |t| t.yellow()),
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
        }
    }

    Ok(())
}

/// Interactively write the config file. Blank answers keep the current value.
pub(crate) fn run_config_setup() -> Result<(), CliError> {
    println!(
        "{}",
        "Gadget Shelf Setup".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    let existing = SyncConfig::load();

    let read_line = |prompt: &str, current: Option<&str>| -> Result<Option<String>, CliError> {
        match current {
            Some(cur) => print!("  {} [{}]: ", prompt, cur),
            None => print!("  {}: ", prompt),
        }
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let trimmed = input.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    };

    println!(
        "  {}",
        "Remote document (press Enter to keep the current value):"
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    let masked_token = existing.token.as_deref().map(mask_value);
    let token = read_line("token", masked_token.as_deref())?;
    let document_id = read_line("document_id", existing.document_id.as_deref())?;

    println!();
    let masked_secret = mask_value(&existing.admin_secret);
    let admin_secret = read_line("admin_secret", Some(&masked_secret))?;

    let mut config = existing.with_token(token).with_document_id(document_id);
    if let Some(secret) = admin_secret {
        config.admin_secret = secret;
    }

    let path = save_to_file(&config)
        .map_err(|e| CliError::config(format!("Failed to save config: {}", e)))?;

    println!();
    log::info!(
        "{} Configuration saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match config_path() {
        Some(path) => log::info!("{}", path.display()),
        None => return Err(CliError::config("Could not determine config directory")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::mask_value;

    #[test]
    fn mask_keeps_two_leading_characters() {
        assert_eq!(mask_value("ghp_abcdef"), "gh****");
        assert_eq!(mask_value("哆啦A梦"), "哆啦****");
    }

    #[test]
    fn mask_hides_short_values_entirely() {
        assert_eq!(mask_value(""), "****");
        assert_eq!(mask_value("ab"), "****");
    }
}
