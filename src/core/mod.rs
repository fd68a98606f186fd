//! # Core Module
//!
//! The front-end-agnostic indexing engine.
//!
//! ## Modules
//! - `scanner` - Enumerates candidate image files under a root
//! - `hasher` - Computes content digests
//! - `metadata` - Extracts EXIF capture metadata
//! - `catalog` - The durable, queryable record store
//! - `pipeline` - Orchestrates walk → hash → extract → insert

pub mod catalog;
pub mod hasher;
pub mod metadata;
pub mod pipeline;
pub mod scanner;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export commonly used types
pub use catalog::{CatalogStats, CatalogStore, IndexedPhoto, InMemoryCatalog, PhotoEntry, SqliteCatalog};
pub use metadata::CaptureMetadata;
pub use pipeline::{CancellationToken, Pipeline};
pub use scanner::{ScanConfig, WalkDirScanner};
