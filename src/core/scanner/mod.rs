//! # Scanner Module
//!
//! Enumerates candidate image files under a root directory.
//!
//! ## Behavior
//! - Lazy: files are yielded as the walk proceeds, never materialized
//!   up front
//! - Deterministic: entries are visited in file-name order for a given tree
//! - Extension-filtered: only recognized image extensions are yielded
//!   (case-insensitive; the set is a configuration point)
//! - Strict by default: the first unreadable entry fails the whole scan,
//!   with an opt-in skip-and-continue mode
//!
//! ## Example
//! ```rust,ignore
//! use photo_catalog::core::scanner::{ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! for path in scanner.files(Path::new("/photos"))? {
//!     println!("{}", path?.display());
//! }
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{ScanConfig, ScanIter, WalkDirScanner};
