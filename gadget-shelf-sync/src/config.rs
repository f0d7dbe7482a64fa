//! Remote store and admin settings.
//!
//! Priority per field: env var > `config.toml` > built-in default.

use std::path::{Path, PathBuf};

use crate::error::SyncError;

pub const DEFAULT_API_URL: &str = "https://api.github.com/gists";
pub const DEFAULT_FILE_NAME: &str = "doraemon-items.json";
pub const DEFAULT_DESCRIPTION: &str = "Doraemon gadget catalog";
pub const DEFAULT_ADMIN_SECRET: &str = "doraemon2024";

/// Token value shipped in the sample config; treated as "no token".
const PLACEHOLDER_TOKEN: &str = "你的GitHub Token";

const ENV_TOKEN: &str = "GADGET_SHELF_TOKEN";
const ENV_DOCUMENT_ID: &str = "GADGET_SHELF_DOCUMENT_ID";
const ENV_API_URL: &str = "GADGET_SHELF_API_URL";
const ENV_FILE_NAME: &str = "GADGET_SHELF_FILE_NAME";
const ENV_ADMIN_SECRET: &str = "GADGET_SHELF_ADMIN_SECRET";

/// Resolved settings for one session.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Write credential. Without it every save is local-only.
    pub token: Option<String>,
    /// Document to read and update. Falls back to the cached id.
    pub document_id: Option<String>,
    pub api_url: String,
    /// Name of the payload file inside the document.
    pub file_name: String,
    pub description: String,
    /// Shared secret for the admin gate. Not a security boundary.
    pub admin_secret: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            token: None,
            document_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            admin_secret: DEFAULT_ADMIN_SECRET.to_string(),
        }
    }
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    EnvVar(&'static str),
    ConfigFile,
    Default,
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each setting.
#[derive(Debug)]
pub struct ConfigSources {
    pub token: ConfigSource,
    pub document_id: ConfigSource,
    pub api_url: ConfigSource,
    pub file_name: ConfigSource,
    pub admin_secret: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminSection>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
pub struct RemoteSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
pub struct AdminSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl SyncConfig {
    /// Load settings from the process environment and the user config file.
    pub fn load() -> Self {
        Self::resolve(|var| std::env::var(var).ok(), load_config_file().as_ref())
    }

    /// Resolve settings from an env lookup and an already-parsed config file.
    pub fn resolve(env: impl Fn(&str) -> Option<String>, file: Option<&ConfigFile>) -> Self {
        let remote = file.and_then(|f| f.remote.as_ref());
        let admin = file.and_then(|f| f.admin.as_ref());
        let pick = |var: &str, from_file: Option<&Option<String>>| {
            non_empty(env(var)).or_else(|| non_empty(from_file.cloned().flatten()))
        };
        let token = usable_token(env(ENV_TOKEN))
            .or_else(|| usable_token(remote.and_then(|r| r.token.clone())));

        let defaults = Self::default();
        Self {
            token,
            document_id: pick(ENV_DOCUMENT_ID, remote.map(|r| &r.document_id)),
            api_url: pick(ENV_API_URL, remote.map(|r| &r.api_url))
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            file_name: pick(ENV_FILE_NAME, remote.map(|r| &r.file_name))
                .unwrap_or(defaults.file_name),
            description: non_empty(remote.and_then(|r| r.description.clone()))
                .unwrap_or(defaults.description),
            admin_secret: pick(ENV_ADMIN_SECRET, admin.map(|a| &a.secret))
                .unwrap_or(defaults.admin_secret),
        }
    }

    /// True when a write credential is configured.
    pub fn can_push(&self) -> bool {
        self.token.is_some()
    }

    /// Compare user input against the admin secret.
    pub fn verify_admin(&self, input: &str) -> bool {
        input == self.admin_secret
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        if let Some(t) = non_empty(token) {
            self.token = Some(t);
        }
        self
    }

    pub fn with_document_id(mut self, id: Option<String>) -> Self {
        if let Some(id) = non_empty(id) {
            self.document_id = Some(id);
        }
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A token that is neither blank nor the setup placeholder.
fn usable_token(value: Option<String>) -> Option<String> {
    non_empty(value).filter(|t| t != PLACEHOLDER_TOKEN)
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gadget-shelf").join("config.toml"))
}

/// Read and parse the config file, if present and valid.
pub fn load_config_file() -> Option<ConfigFile> {
    let path = config_path()?;
    read_config_file(&path)
}

pub fn read_config_file(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring unreadable config {}: {}", path.display(), e);
            None
        }
    }
}

/// Save `config` to the user config file, creating parent directories as
/// needed. Defaults are left out of the file. Returns the path written.
pub fn save_to_file(config: &SyncConfig) -> Result<PathBuf, SyncError> {
    let path = config_path()
        .ok_or_else(|| SyncError::Config("Could not determine config directory".to_string()))?;
    write_config_file(&path, config)?;
    Ok(path)
}

pub fn write_config_file(path: &Path, config: &SyncConfig) -> Result<(), SyncError> {
    let unless_default = |value: &str, default: &str| {
        if value == default {
            None
        } else {
            Some(value.to_string())
        }
    };

    let file = ConfigFile {
        remote: Some(RemoteSection {
            token: config.token.clone(),
            document_id: config.document_id.clone(),
            api_url: unless_default(&config.api_url, DEFAULT_API_URL),
            file_name: unless_default(&config.file_name, DEFAULT_FILE_NAME),
            description: unless_default(&config.description, DEFAULT_DESCRIPTION),
        }),
        admin: unless_default(&config.admin_secret, DEFAULT_ADMIN_SECRET)
            .map(|secret| AdminSection { secret: Some(secret) }),
    };

    let toml_str = toml::to_string_pretty(&file)
        .map_err(|e| SyncError::Config(format!("Failed to serialize config: {}", e)))?;

    let io_err = |e: std::io::Error| SyncError::Config(format!("Failed to write {}: {}", path.display(), e));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, toml_str).map_err(io_err)?;
    Ok(())
}

/// Determine where each setting is coming from.
pub fn config_sources() -> ConfigSources {
    sources_from(|var| std::env::var(var).ok(), load_config_file().as_ref())
}

pub fn sources_from(
    env: impl Fn(&str) -> Option<String>,
    file: Option<&ConfigFile>,
) -> ConfigSources {
    let remote = file.and_then(|f| f.remote.as_ref());
    let admin = file.and_then(|f| f.admin.as_ref());
    let source = |var: &'static str, in_file: bool, fallback: ConfigSource| {
        if non_empty(env(var)).is_some() {
            ConfigSource::EnvVar(var)
        } else if in_file {
            ConfigSource::ConfigFile
        } else {
            fallback
        }
    };
    let set = |v: Option<&String>| v.is_some_and(|s| !s.trim().is_empty());

    let token = if usable_token(env(ENV_TOKEN)).is_some() {
        ConfigSource::EnvVar(ENV_TOKEN)
    } else if usable_token(remote.and_then(|r| r.token.clone())).is_some() {
        ConfigSource::ConfigFile
    } else {
        ConfigSource::Missing
    };

    ConfigSources {
        token,
        document_id: source(
            ENV_DOCUMENT_ID,
            set(remote.and_then(|r| r.document_id.as_ref())),
            ConfigSource::Missing,
        ),
        api_url: source(
            ENV_API_URL,
            set(remote.and_then(|r| r.api_url.as_ref())),
            ConfigSource::Default,
        ),
        file_name: source(
            ENV_FILE_NAME,
            set(remote.and_then(|r| r.file_name.as_ref())),
            ConfigSource::Default,
        ),
        admin_secret: source(
            ENV_ADMIN_SECRET,
            set(admin.and_then(|a| a.secret.as_ref())),
            ConfigSource::Default,
        ),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
