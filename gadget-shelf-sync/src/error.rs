use gadget_shelf_catalog::{CatalogError, ItemId};

/// Errors that can occur while loading, mutating, or persisting the catalog.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Document store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed remote document: {0}")]
    MalformedDocument(String),

    #[error("Local cache I/O error at {path}: {source}")]
    CacheIo {
        path: String,
        source: std::io::Error,
    },

    #[error("Local cache is corrupt ({path}): {source}")]
    CorruptCache {
        path: String,
        source: serde_json::Error,
    },

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog has not finished loading")]
    NotReady,

    #[error("Another edit is already open ({0})")]
    EditInProgress(String),

    #[error("No item with id {0}")]
    ItemNotFound(ItemId),
}

impl SyncError {
    /// Remote-side failures; these downgrade to local-only and never escape the
    /// controller.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Status { .. } | Self::MalformedDocument(_)
        )
    }
}

impl From<CatalogError> for SyncError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ItemNotFound(id) => Self::ItemNotFound(id),
            other => Self::Config(other.to_string()),
        }
    }
}
