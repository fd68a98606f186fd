//! Catalog store trait definition.

use super::{CatalogStats, IndexedPhoto, PhotoEntry};
use crate::error::CatalogError;
use chrono::NaiveDate;

/// Trait for catalog store backends
///
/// The pipeline and query layer only ever see this interface, so tests can
/// swap the SQLite backend for the in-memory one.
pub trait CatalogStore: Send + Sync {
    /// Idempotently ensure the schema and its indexes exist
    ///
    /// Safe to call on an already-initialized store.
    fn initialize(&self) -> Result<(), CatalogError>;

    /// Append a new record, returning the store-assigned record id
    ///
    /// Never overwrites or merges with an existing record; every call
    /// produces a new row. `indexed_at` is assigned by the store.
    fn insert(&self, entry: &PhotoEntry) -> Result<i64, CatalogError>;

    /// All records whose content hash exactly equals `hash`, in insertion
    /// order
    ///
    /// Returns an empty Vec - not an error - when nothing matches.
    fn find_by_hash(&self, hash: &str) -> Result<Vec<IndexedPhoto>, CatalogError>;

    /// All records whose capture timestamp falls on `date`, ignoring
    /// time-of-day, in insertion order
    ///
    /// Records without a capture timestamp never match any date. Returns an
    /// empty Vec - not an error - when nothing matches.
    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<IndexedPhoto>, CatalogError>;

    /// Catalog totals
    fn stats(&self) -> Result<CatalogStats, CatalogError>;
}
