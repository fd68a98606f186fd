//! # Photo Catalog
//!
//! Indexes a directory tree of image files into a persistent catalog keyed
//! by content hash, capturing capture-time EXIF metadata, and answers
//! lookups by exact hash or by capture date.
//!
//! ## Core Philosophy
//! - **Append-only** - the catalog never mutates or deletes a record;
//!   partial progress from an aborted scan is kept, not rolled back
//! - **Absent metadata is normal** - many exports strip EXIF; those files
//!   are indexed with empty capture fields, never skipped
//! - **Untrusted values** - paths, hashes, and camera strings are data,
//!   never command text; the store binds every parameter
//!
//! ## Architecture
//! The library is split into a core engine (front-end-agnostic) and
//! presentation layers:
//! - `core` - walker, hasher, metadata extractor, catalog store, pipeline
//! - `events` - event-driven progress reporting (front-end-ready)
//! - `error` - error types per component
//! - `cli` - command-line interface (in the binary)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{PhotoCatalogError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
