//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the ingestion pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Tree-walking phase events
    Scan(ScanEvent),
    /// Per-file ingestion events
    Ingest(IngestEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events while the walker enumerates candidate files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Walking has started from the given root
    Started { root: PathBuf },
    /// A candidate image file was found
    PhotoFound { path: PathBuf },
}

/// Events for individual files moving through hash-extract-insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IngestEvent {
    /// A file was hashed, extracted, and inserted into the catalog
    Indexed { path: PathBuf, record_id: i64 },
    /// The file carried no usable EXIF block; indexed with absent fields
    MetadataMissing { path: PathBuf, message: String },
    /// Progress counter update
    Progress(IngestProgress),
}

/// Progress information during ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestProgress {
    /// Number of files fully ingested so far
    pub indexed: usize,
    /// Of those, how many had no capture metadata
    pub metadata_missing: usize,
    /// File most recently completed
    pub current_path: PathBuf,
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Pipeline completed successfully
    Completed { summary: ScanSummary },
    /// Pipeline was cancelled before completion
    Cancelled,
    /// Pipeline aborted on a fatal error
    Error { message: String },
}

/// Summary of a completed scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Catalog records inserted by this scan
    pub files_indexed: usize,
    /// Records inserted with both capture fields absent
    pub metadata_missing: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Ingest(IngestEvent::Progress(IngestProgress {
            indexed: 42,
            metadata_missing: 3,
            current_path: PathBuf::from("/photos/a.jpg"),
        }));

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Ingest(IngestEvent::Progress(p)) => {
                assert_eq!(p.indexed, 42);
                assert_eq!(p.metadata_missing, 3);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn scan_summary_is_serializable() {
        let summary = ScanSummary {
            files_indexed: 1000,
            metadata_missing: 17,
            duration_ms: 5000,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("1000"));
    }
}
