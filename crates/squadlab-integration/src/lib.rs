//! Squadlab Integration - Catalog loading
//!
//! Reads character and item catalogs from local JSON exports and from
//! remote-store snapshots.

pub mod error;
pub mod loader;

pub use error::LoadError;
pub use loader::{parse_catalog, read_catalog, CatalogFormat, CatalogRecord};
