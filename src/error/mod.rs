//! # Error Module
//!
//! Error types for the photo catalog.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Distinguish fatal from expected** - a missing EXIF block is normal
//!   for this domain and must stay separate from hard I/O failures

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum PhotoCatalogError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Errors that occur while walking the photo tree
///
/// Under the default strict policy every one of these is fatal to the
/// in-progress scan; records inserted before the failure are kept.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory entry {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scan was cancelled")]
    Cancelled,
}

/// Errors that occur while hashing file content
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to read {path} for hashing: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur during metadata extraction
///
/// `NoExifBlock` is the expected, recoverable case: the ingestion pipeline
/// downgrades it to a warning and indexes the file with both capture fields
/// absent. A block that merely lacks a timestamp or model field is not an
/// error at all - those fields come back as `None`.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("No EXIF block in {path}: {reason}")]
    NoExifBlock { path: PathBuf, reason: String },

    #[error("Failed to open {path} for metadata extraction: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur at the catalog store
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to open catalog database at {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    #[error("Catalog query failed: {0}")]
    QueryFailed(String),

    #[error("Catalog corruption detected at {path}. Delete this file and re-scan.")]
    Corrupted { path: PathBuf },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, PhotoCatalogError>;
