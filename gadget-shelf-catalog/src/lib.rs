//! Gadget catalog data model, in-memory mutations, filtering, and YAML seeds.
//!
//! This crate knows nothing about persistence. `gadget-shelf-sync` decides
//! where a [`Collection`] comes from and where each new version is written.

pub mod defaults;
pub mod error;
pub mod filter;
pub mod mutate;
pub mod types;
pub mod yaml;

pub use defaults::{KNOWN_CATEGORIES, default_collection};
pub use error::CatalogError;
pub use filter::{CatalogStats, ItemFilter};
pub use types::*;
pub use yaml::{load_seed, save_seed};
