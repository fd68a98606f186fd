//! SQLite catalog backend for persistent storage.

use super::{CatalogStats, CatalogStore, IndexedPhoto, PhotoEntry};
use crate::error::CatalogError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage format for datetimes; matches SQLite's CURRENT_TIMESTAMP output
/// and sorts chronologically as text
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SELECT_COLUMNS: &str =
    "SELECT id, file_path, content_hash, captured_at, camera_model, indexed_at FROM photos";

/// SQLite-backed persistent catalog
///
/// Uses WAL (Write-Ahead Logging) mode for better concurrent access. The
/// connection is serialized behind a Mutex, which is what makes the insert
/// path safe under the pipeline's parallel workers.
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteCatalog {
    /// Open or create a catalog database at the given path
    ///
    /// The schema is not created here; call
    /// [`initialize`](CatalogStore::initialize) before the first insert.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::OpenFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let conn = Connection::open(path).map_err(|e| CatalogError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| CatalogError::QueryFailed(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path: path.to_path_buf(),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, CatalogError> {
        self.conn.lock().map_err(|_| CatalogError::Corrupted {
            path: self.db_path.clone(),
        })
    }

    /// Run a SELECT returning whole records, with one bound parameter
    fn query_photos(
        &self,
        sql: &str,
        param: &str,
    ) -> Result<Vec<IndexedPhoto>, CatalogError> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| CatalogError::QueryFailed(e.to_string()))?;

        let raw: Vec<RawRow> = stmt
            .query_map(params![param], |row| {
                Ok(RawRow {
                    record_id: row.get(0)?,
                    file_path: row.get(1)?,
                    content_hash: row.get(2)?,
                    captured_at: row.get(3)?,
                    camera_model: row.get(4)?,
                    indexed_at: row.get(5)?,
                })
            })
            .map_err(|e| CatalogError::QueryFailed(e.to_string()))?
            .collect::<Result<_, _>>()
            .map_err(|e| CatalogError::QueryFailed(e.to_string()))?;

        raw.into_iter().map(|r| self.hydrate(r)).collect()
    }

    fn hydrate(&self, raw: RawRow) -> Result<IndexedPhoto, CatalogError> {
        // A store-assigned timestamp that fails to parse means the file is
        // not a catalog we wrote
        let indexed_at =
            parse_datetime_text(&raw.indexed_at).ok_or_else(|| CatalogError::Corrupted {
                path: self.db_path.clone(),
            })?;

        Ok(IndexedPhoto {
            record_id: raw.record_id,
            file_path: raw.file_path,
            content_hash: raw.content_hash,
            captured_at: raw.captured_at.as_deref().and_then(parse_datetime_text),
            camera_model: raw.camera_model,
            indexed_at,
        })
    }
}

struct RawRow {
    record_id: i64,
    file_path: String,
    content_hash: String,
    captured_at: Option<String>,
    camera_model: Option<String>,
    indexed_at: String,
}

fn datetime_text(value: DateTime<Utc>) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

fn parse_datetime_text(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

impl CatalogStore for SqliteCatalog {
    fn initialize(&self) -> Result<(), CatalogError> {
        let conn = self.lock()?;

        // The date index is an expression index so find_by_date stays an
        // index lookup as the catalog grows
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS photos (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                file_path     TEXT NOT NULL,
                content_hash  TEXT NOT NULL,
                captured_at   TEXT,
                camera_model  TEXT,
                indexed_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_photos_content_hash ON photos(content_hash);
            CREATE INDEX IF NOT EXISTS idx_photos_captured_on ON photos(date(captured_at));",
        )
        .map_err(|e| CatalogError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    fn insert(&self, entry: &PhotoEntry) -> Result<i64, CatalogError> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO photos (file_path, content_hash, captured_at, camera_model)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.file_path,
                entry.content_hash,
                entry.captured_at.map(datetime_text),
                entry.camera_model,
            ],
        )
        .map_err(|e| CatalogError::QueryFailed(e.to_string()))?;

        Ok(conn.last_insert_rowid())
    }

    fn find_by_hash(&self, hash: &str) -> Result<Vec<IndexedPhoto>, CatalogError> {
        self.query_photos(
            &format!("{SELECT_COLUMNS} WHERE content_hash = ?1 ORDER BY id"),
            hash,
        )
    }

    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<IndexedPhoto>, CatalogError> {
        self.query_photos(
            &format!("{SELECT_COLUMNS} WHERE date(captured_at) = ?1 ORDER BY id"),
            &date.format("%Y-%m-%d").to_string(),
        )
    }

    fn stats(&self) -> Result<CatalogStats, CatalogError> {
        let conn = self.lock()?;

        let (total_records, distinct_hashes): (i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), COUNT(DISTINCT content_hash) FROM photos",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| CatalogError::QueryFailed(e.to_string()))?;

        // The fixed text format sorts chronologically, so MIN/MAX on the
        // column are the capture range
        let (earliest, latest): (Option<String>, Option<String>) = conn
            .query_row(
                "SELECT MIN(captured_at), MAX(captured_at) FROM photos",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| CatalogError::QueryFailed(e.to_string()))?;

        Ok(CatalogStats {
            total_records: total_records as usize,
            distinct_hashes: distinct_hashes as usize,
            earliest_capture: earliest.as_deref().and_then(parse_datetime_text),
            latest_capture: latest.as_deref().and_then(parse_datetime_text),
        })
    }
}
