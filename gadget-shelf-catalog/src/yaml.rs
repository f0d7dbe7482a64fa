//! YAML seed files.
//!
//! A seed is a YAML sequence of items using the same field names as the JSON
//! document. Seeds replace the built-in defaults and are what `export` writes.

use std::path::Path;

use crate::error::CatalogError;
use crate::types::Collection;

/// Load a seed collection from a YAML file.
pub fn load_seed(path: &Path) -> Result<Collection, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yml::from_str(&contents).map_err(|e| CatalogError::Yaml {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write `collection` as a YAML seed, creating parent directories as needed.
pub fn save_seed(path: &Path, collection: &Collection) -> Result<(), CatalogError> {
    let io_err = |e: std::io::Error| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    };
    let yaml = serde_yml::to_string(collection).map_err(|e| CatalogError::Yaml {
        path: path.display().to_string(),
        source: e,
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, yaml).map_err(io_err)
}
