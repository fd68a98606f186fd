//! # Catalog Module
//!
//! The durable, queryable collection of indexed-photo records.
//!
//! ## Semantics
//! - Append-only: records are never mutated after insertion; corrections
//!   mean inserting a new record
//! - No uniqueness: the same content hash (and the same path) may appear in
//!   any number of rows
//! - Store-assigned identity: `record_id` and `indexed_at` exist only once
//!   a record is persisted
//!
//! ## Backends
//! - `SqliteCatalog` - durable storage using SQLite
//! - `InMemoryCatalog` - for tests and throwaway runs
//!
//! All field values are treated as untrusted data: every statement touching
//! caller-supplied text uses bound parameters, never spliced command text.

mod memory;
mod sqlite;
mod traits;

pub use memory::InMemoryCatalog;
pub use sqlite::SqliteCatalog;
pub use traits::CatalogStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An in-flight record the pipeline assembles per file, before the store
/// has assigned identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoEntry {
    /// Path as encountered during the walk
    pub file_path: String,
    /// Lowercase hex digest of the file's bytes
    pub content_hash: String,
    /// Capture timestamp, absent when no/unparsable metadata
    pub captured_at: Option<DateTime<Utc>>,
    /// Camera model, absent under the same conditions
    pub camera_model: Option<String>,
}

/// A persisted catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedPhoto {
    /// Store-assigned identity, unique and increasing
    pub record_id: i64,
    /// Path as encountered during the walk
    pub file_path: String,
    /// Lowercase hex digest of the file's bytes
    pub content_hash: String,
    /// Capture timestamp, absent when no/unparsable metadata
    pub captured_at: Option<DateTime<Utc>>,
    /// Camera model, absent under the same conditions
    pub camera_model: Option<String>,
    /// Insertion time, assigned by the store
    pub indexed_at: DateTime<Utc>,
}

/// Catalog totals for the stats surface
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Total number of records
    pub total_records: usize,
    /// Number of distinct content hashes
    pub distinct_hashes: usize,
    /// Earliest capture timestamp across all records
    pub earliest_capture: Option<DateTime<Utc>>,
    /// Latest capture timestamp across all records
    pub latest_capture: Option<DateTime<Utc>>,
}
