use thiserror::Error;

use gadget_shelf_catalog::CatalogError;
use gadget_shelf_sync::SyncError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Loading or saving the catalog failed
    #[error("{0}")]
    Sync(#[from] SyncError),

    /// Seed or export file error
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Wrong or missing admin secret
    #[error("Admin access denied")]
    AdminDenied,

    /// Bad command-line input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
