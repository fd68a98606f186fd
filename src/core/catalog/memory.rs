//! In-memory catalog backend for tests and throwaway runs.

use super::{CatalogStats, CatalogStore, IndexedPhoto, PhotoEntry};
use crate::error::CatalogError;
use chrono::{NaiveDate, Timelike, Utc};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

/// In-memory catalog backend
///
/// Mirrors the SQLite backend's observable behavior: sequential ids,
/// insertion-order results, second-precision indexed_at, date matching on
/// the calendar day.
pub struct InMemoryCatalog {
    inner: Mutex<Inner>,
}

struct Inner {
    records: Vec<IndexedPhoto>,
    next_id: i64,
}

impl InMemoryCatalog {
    /// Create an empty in-memory catalog
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, CatalogError> {
        self.inner.lock().map_err(|_| CatalogError::Corrupted {
            path: PathBuf::from("memory"),
        })
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for InMemoryCatalog {
    fn initialize(&self) -> Result<(), CatalogError> {
        // Nothing to create; trivially idempotent
        self.lock().map(|_| ())
    }

    fn insert(&self, entry: &PhotoEntry) -> Result<i64, CatalogError> {
        let mut inner = self.lock()?;

        let record_id = inner.next_id;
        inner.next_id += 1;

        // Truncate to seconds to match SQLite's CURRENT_TIMESTAMP precision
        let indexed_at = Utc::now().with_nanosecond(0).expect("zero is valid");

        inner.records.push(IndexedPhoto {
            record_id,
            file_path: entry.file_path.clone(),
            content_hash: entry.content_hash.clone(),
            captured_at: entry.captured_at,
            camera_model: entry.camera_model.clone(),
            indexed_at,
        });

        Ok(record_id)
    }

    fn find_by_hash(&self, hash: &str) -> Result<Vec<IndexedPhoto>, CatalogError> {
        let inner = self.lock()?;

        Ok(inner
            .records
            .iter()
            .filter(|r| r.content_hash == hash)
            .cloned()
            .collect())
    }

    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<IndexedPhoto>, CatalogError> {
        let inner = self.lock()?;

        Ok(inner
            .records
            .iter()
            .filter(|r| r.captured_at.map(|t| t.date_naive()) == Some(date))
            .cloned()
            .collect())
    }

    fn stats(&self) -> Result<CatalogStats, CatalogError> {
        let inner = self.lock()?;

        let distinct_hashes: HashSet<&str> = inner
            .records
            .iter()
            .map(|r| r.content_hash.as_str())
            .collect();

        let captures = inner.records.iter().filter_map(|r| r.captured_at);

        Ok(CatalogStats {
            total_records: inner.records.len(),
            distinct_hashes: distinct_hashes.len(),
            earliest_capture: captures.clone().min(),
            latest_capture: captures.max(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(path: &str, hash: &str) -> PhotoEntry {
        PhotoEntry {
            file_path: path.to_string(),
            content_hash: hash.to_string(),
            captured_at: Some(Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).unwrap()),
            camera_model: Some("CamA".to_string()),
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let catalog = InMemoryCatalog::new();

        let first = catalog.insert(&entry("/p/a.jpg", "aa")).unwrap();
        let second = catalog.insert(&entry("/p/b.jpg", "bb")).unwrap();

        assert_eq!(second, first + 1);
    }

    #[test]
    fn find_by_hash_returns_insertion_order() {
        let catalog = InMemoryCatalog::new();

        catalog.insert(&entry("/p/a.jpg", "same")).unwrap();
        catalog.insert(&entry("/q/b.jpg", "same")).unwrap();

        let found = catalog.find_by_hash("same").unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].record_id < found[1].record_id);
        assert_eq!(found[0].file_path, "/p/a.jpg");
    }

    #[test]
    fn unknown_hash_returns_empty() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog.find_by_hash("missing").unwrap().is_empty());
    }

    #[test]
    fn date_matching_ignores_time_of_day() {
        let catalog = InMemoryCatalog::new();

        let mut morning = entry("/p/morning.jpg", "aa");
        morning.captured_at = Some(Utc.with_ymd_and_hms(2023, 6, 1, 8, 0, 0).unwrap());
        let mut evening = entry("/p/evening.jpg", "bb");
        evening.captured_at = Some(Utc.with_ymd_and_hms(2023, 6, 1, 21, 0, 0).unwrap());

        catalog.insert(&morning).unwrap();
        catalog.insert(&evening).unwrap();
        catalog.insert(&entry("/p/bare.png", "cc")).unwrap();

        let mut bare = entry("/p/none.png", "dd");
        bare.captured_at = None;
        catalog.insert(&bare).unwrap();

        let found = catalog
            .find_by_date(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap())
            .unwrap();

        // morning, evening, and the default 10:00 entry; never the
        // capture-less record
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|r| r.captured_at.is_some()));
    }

    #[test]
    fn initialize_is_idempotent() {
        let catalog = InMemoryCatalog::new();
        catalog.initialize().unwrap();
        catalog.insert(&entry("/p/a.jpg", "aa")).unwrap();
        catalog.initialize().unwrap();

        assert_eq!(catalog.stats().unwrap().total_records, 1);
    }

    #[test]
    fn stats_count_distinct_hashes() {
        let catalog = InMemoryCatalog::new();

        catalog.insert(&entry("/p/a.jpg", "same")).unwrap();
        catalog.insert(&entry("/q/b.jpg", "same")).unwrap();
        catalog.insert(&entry("/p/c.jpg", "other")).unwrap();

        let stats = catalog.stats().unwrap();
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.distinct_hashes, 2);
    }
}
