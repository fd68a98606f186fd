//! Ingestion pipeline execution.

use crate::core::catalog::{CatalogStore, InMemoryCatalog, PhotoEntry};
use crate::core::hasher;
use crate::core::metadata::{self, CaptureMetadata};
use crate::core::scanner::{ScanConfig, WalkDirScanner};
use crate::error::{PhotoCatalogError, ScanError};
use crate::events::{
    null_sender, Event, EventSender, IngestEvent, IngestProgress, PipelineEvent, ScanEvent,
    ScanSummary,
};
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Cancellation signal shared by the walker and every in-flight file task
///
/// Set once, never cleared. The first hard error flips it so no new files
/// start; a front end may also flip it to cancel a scan.
#[derive(Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a fresh, uncancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    scan_config: ScanConfig,
    store: Option<Arc<dyn CatalogStore>>,
    token: CancellationToken,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            scan_config: ScanConfig::default(),
            store: None,
            token: CancellationToken::new(),
        }
    }

    /// Set the catalog store records are inserted into
    ///
    /// Defaults to an in-memory catalog when not set.
    pub fn store(mut self, store: Arc<dyn CatalogStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the walker configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.scan_config = config;
        self
    }

    /// Include hidden files
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.scan_config.include_hidden = include;
        self
    }

    /// Skip unreadable entries instead of aborting the scan
    pub fn skip_unreadable(mut self, skip: bool) -> Self {
        self.scan_config.skip_unreadable = skip;
        self
    }

    /// Override the recognized image extensions
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.scan_config.extensions = Some(extensions);
        self
    }

    /// Use an externally-owned cancellation token
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            scan_config: self.scan_config,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemoryCatalog::new())),
            token: self.token,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The ingestion pipeline: walk → hash → extract → insert
///
/// Per-file work is stateless and independent, so files are processed on a
/// rayon pool fed lazily from the walker. The first hard error (unreadable
/// entry, hash I/O failure, store failure) cancels the scan: workers
/// mid-file finish that file, no new files start, and records inserted
/// before the failure are kept. Metadata-extraction failures never abort;
/// the file is indexed with both capture fields absent.
pub struct Pipeline {
    scan_config: ScanConfig,
    store: Arc<dyn CatalogStore>,
    token: CancellationToken,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// The token that cancels this pipeline's scans
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Run a scan without progress reporting
    pub fn run(&self, root: &Path) -> Result<ScanSummary, PhotoCatalogError> {
        self.run_with_events(root, &null_sender())
    }

    /// Run a scan, emitting progress events
    pub fn run_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<ScanSummary, PhotoCatalogError> {
        let start = Instant::now();

        events.send(Event::Pipeline(PipelineEvent::Started));

        self.store.initialize()?;

        events.send(Event::Scan(ScanEvent::Started {
            root: root.to_path_buf(),
        }));

        let scanner = WalkDirScanner::new(self.scan_config.clone());
        let files = scanner.files(root).map_err(|e| {
            let e = PhotoCatalogError::from(e);
            events.send(Event::Pipeline(PipelineEvent::Error {
                message: e.to_string(),
            }));
            e
        })?;

        let indexed = AtomicUsize::new(0);
        let metadata_missing = AtomicUsize::new(0);
        let token = &self.token;

        let result = files
            .take_while(|_| !token.is_cancelled())
            .par_bridge()
            .try_for_each(|item| -> Result<(), PhotoCatalogError> {
                if token.is_cancelled() {
                    // Cancelled workers stop quietly; the error that set
                    // the token (if any) is reported by its own worker
                    return Ok(());
                }

                let outcome = item.map_err(PhotoCatalogError::from).and_then(|path| {
                    self.ingest_file(&path, events, &indexed, &metadata_missing)
                });

                outcome.inspect_err(|_| token.cancel())
            });

        if let Err(error) = result {
            events.send(Event::Pipeline(PipelineEvent::Error {
                message: error.to_string(),
            }));
            return Err(error);
        }

        if token.is_cancelled() {
            events.send(Event::Pipeline(PipelineEvent::Cancelled));
            return Err(ScanError::Cancelled.into());
        }

        let summary = ScanSummary {
            files_indexed: indexed.load(Ordering::SeqCst),
            metadata_missing: metadata_missing.load(Ordering::SeqCst),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: summary.clone(),
        }));

        Ok(summary)
    }

    /// Hash, extract, and insert one file
    fn ingest_file(
        &self,
        path: &Path,
        events: &EventSender,
        indexed: &AtomicUsize,
        metadata_missing: &AtomicUsize,
    ) -> Result<(), PhotoCatalogError> {
        events.send(Event::Scan(ScanEvent::PhotoFound {
            path: path.to_path_buf(),
        }));

        let content_hash = hasher::hash_file(path)?;

        let capture = match metadata::extract(path) {
            Ok(capture) => capture,
            Err(error) => {
                // Absent metadata is a normal case for this domain; warn
                // and index the file with both fields empty
                tracing::warn!("no capture metadata for {}: {error}", path.display());
                metadata_missing.fetch_add(1, Ordering::SeqCst);
                events.send(Event::Ingest(IngestEvent::MetadataMissing {
                    path: path.to_path_buf(),
                    message: error.to_string(),
                }));
                CaptureMetadata::empty()
            }
        };

        let entry = PhotoEntry {
            file_path: path.to_string_lossy().into_owned(),
            content_hash,
            captured_at: capture.captured_at,
            camera_model: capture.camera_model,
        };

        let record_id = self.store.insert(&entry)?;

        let done = indexed.fetch_add(1, Ordering::SeqCst) + 1;
        events.send(Event::Ingest(IngestEvent::Indexed {
            path: path.to_path_buf(),
            record_id,
        }));
        events.send(Event::Ingest(IngestEvent::Progress(IngestProgress {
            indexed: done,
            metadata_missing: metadata_missing.load(Ordering::SeqCst),
            current_path: path.to_path_buf(),
        })));

        Ok(())
    }
}
