//! Loading and persisting the gadget catalog.
//!
//! The remote document store is authoritative when reachable; the local
//! cache is a backup rewritten after every successful load or save. The
//! [`SyncController`] owns the session's collection and is the only thing
//! the presentation layer talks to.

pub mod cache;
pub mod client;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod status;

pub use cache::{FileCache, LocalStore, default_cache_dir};
pub use client::{DocumentStore, GistClient};
pub use config::{ConfigSource, ConfigSources, SyncConfig, config_path, config_sources, save_to_file};
pub use controller::{EditTarget, Mutation, Phase, SyncController};
pub use error::SyncError;
pub use status::SyncStatus;
