//! # Metadata Module
//!
//! Extracts capture-time metadata from embedded EXIF blocks.
//!
//! ## Extracted Fields
//! - Capture timestamp (DateTimeOriginal, falling back to DateTime)
//! - Camera model
//!
//! ## Failure Axes
//! The two absence cases are deliberately distinct:
//! - the file has no parseable EXIF block at all →
//!   [`MetadataError::NoExifBlock`], which the pipeline downgrades to a
//!   warning;
//! - the block exists but lacks a timestamp or model field → those fields
//!   are simply `None` in the result.
//!
//! Many exports and most PNGs strip EXIF entirely, so the no-block case is
//! routine for this domain.

use crate::error::MetadataError;
use chrono::{DateTime, NaiveDateTime, Utc};
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Capture-time metadata for one photo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureMetadata {
    /// Original capture date/time
    pub captured_at: Option<DateTime<Utc>>,
    /// Camera model (e.g., "iPhone 15 Pro")
    pub camera_model: Option<String>,
}

impl CaptureMetadata {
    /// Metadata with both fields absent, used when no EXIF block exists
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Extract capture metadata from the photo at `path`
///
/// Returns [`MetadataError::NoExifBlock`] when the container holds no
/// parseable EXIF data. Fields the block does not carry (or carries in an
/// unparsable form) come back as `None` without failing.
pub fn extract(path: &Path) -> Result<CaptureMetadata, MetadataError> {
    let file = File::open(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(&file);
    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| MetadataError::NoExifBlock {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(from_exif(&exif))
}

fn from_exif(exif: &exif::Exif) -> CaptureMetadata {
    let captured_at = [Tag::DateTimeOriginal, Tag::DateTime]
        .iter()
        .find_map(|&tag| {
            exif.get_field(tag, In::PRIMARY)
                .and_then(|field| get_ascii(&field.value))
                .and_then(|text| parse_exif_datetime(&text))
        });

    let camera_model = exif
        .get_field(Tag::Model, In::PRIMARY)
        .and_then(|field| get_ascii(&field.value));

    CaptureMetadata {
        captured_at,
        camera_model,
    }
}

/// Parse the EXIF ASCII timestamp format "YYYY:MM:DD HH:MM:SS"
///
/// EXIF timestamps carry no zone; they are taken as UTC.
fn parse_exif_datetime(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, "%Y:%m:%d %H:%M:%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Extract a string from an EXIF ASCII value, trimming NUL padding
fn get_ascii(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}
