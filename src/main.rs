//! # photocat CLI
//!
//! Command-line interface for the photo catalog.
//!
//! ## Usage
//! ```bash
//! photocat scan ~/Photos
//! photocat find-hash 9f86d081884c7d65...
//! photocat find-date 2023-06-01
//! photocat stats
//! ```

mod cli;

use photo_catalog::Result;

fn main() -> Result<()> {
    photo_catalog::init_tracing();
    cli::run()
}
