//! # Pipeline Module
//!
//! Orchestrates the ingestion workflow.
//!
//! ## Per-file Sequence
//! 1. **Hash** - content digest of the file's bytes; I/O failure aborts
//!    the whole scan
//! 2. **Extract** - capture metadata on a best-effort basis; absence is a
//!    warning, never an abort
//! 3. **Insert** - append one catalog record; store failure aborts the
//!    whole scan
//!
//! ## Parallelism
//! Files stream lazily from the walker onto a rayon pool; a shared
//! cancellation token preserves first-error-aborts semantics and lets a
//! front end cancel an in-flight scan.

mod executor;

pub use executor::{CancellationToken, Pipeline, PipelineBuilder};
