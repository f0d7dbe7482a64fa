use thiserror::Error;

use crate::types::ItemId;

/// Errors raised by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No item in the collection has this id
    #[error("No item with id {0}")]
    ItemNotFound(ItemId),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yml::Error,
    },
}
