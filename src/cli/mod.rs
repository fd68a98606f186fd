//! # CLI Module
//!
//! Command-line interface for the photo catalog.
//!
//! ## Usage
//! ```bash
//! # Index a photo tree
//! photocat scan ~/Photos
//!
//! # Look up records by content hash or capture date
//! photocat find-hash 9f86d081884c7d65...
//! photocat find-date 2023-06-01
//!
//! # Catalog totals
//! photocat stats
//!
//! # JSON output for scripting
//! photocat find-date 2023-06-01 --output json
//! ```
//!
//! The catalog location comes from `--db`, then the `PHOTO_CATALOG_DB`
//! environment variable, then a per-user data directory.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_catalog::core::catalog::{CatalogStore, IndexedPhoto, SqliteCatalog};
use photo_catalog::core::pipeline::Pipeline;
use photo_catalog::core::scanner::ScanConfig;
use photo_catalog::error::Result;
use photo_catalog::events::{Event, EventChannel, IngestEvent, PipelineEvent};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Photo Catalog - index photos by content hash and capture date
#[derive(Parser, Debug)]
#[command(name = "photocat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the catalog database
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a directory tree into the catalog
    Scan {
        /// Root directory to scan
        root: PathBuf,

        /// Include hidden files and directories
        #[arg(long)]
        include_hidden: bool,

        /// Follow symbolic links
        #[arg(long)]
        follow_symlinks: bool,

        /// Skip unreadable entries instead of aborting the scan
        #[arg(long)]
        skip_unreadable: bool,

        /// Recognized image extension (repeatable; defaults to the
        /// built-in set)
        #[arg(long = "extension")]
        extensions: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Find catalog records by exact content hash
    FindHash {
        /// Lowercase hex content hash
        hash: String,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Find catalog records by capture date
    FindDate {
        /// Calendar date (YYYY-MM-DD); matches ignore time-of-day
        date: NaiveDate,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Show catalog totals
    Stats {
        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db);

    match cli.command {
        Commands::Scan {
            root,
            include_hidden,
            follow_symlinks,
            skip_unreadable,
            extensions,
            output,
        } => {
            let config = ScanConfig {
                follow_symlinks,
                include_hidden,
                max_depth: None,
                extensions: (!extensions.is_empty()).then_some(extensions),
                skip_unreadable,
            };
            run_scan(&db_path, &root, config, output)
        }
        Commands::FindHash { hash, output } => run_find_hash(&db_path, &hash, output),
        Commands::FindDate { date, output } => run_find_date(&db_path, date, output),
        Commands::Stats { output } => run_stats(&db_path, output),
    }
}

/// `--db`, then `PHOTO_CATALOG_DB`, then a per-user data directory
fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("PHOTO_CATALOG_DB").map(PathBuf::from))
        .unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("photo-catalog")
                .join("catalog.db")
        })
}

fn open_catalog(db_path: &Path) -> Result<SqliteCatalog> {
    let catalog = SqliteCatalog::open(db_path)?;
    catalog.initialize()?;
    Ok(catalog)
}

fn run_scan(
    db_path: &Path,
    root: &Path,
    config: ScanConfig,
    output: OutputFormat,
) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photo Catalog").bold().cyan(),
            style(env!("CARGO_PKG_VERSION")).dim()
        ))
        .ok();
    }

    let store = Arc::new(open_catalog(db_path)?);
    let pipeline = Pipeline::builder()
        .store(store)
        .scan_config(config)
        .build();

    let (sender, receiver) = EventChannel::new();

    // Total file count is unknown until the lazy walk finishes, so the
    // pretty path shows a spinner with running counters
    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Ingest(IngestEvent::Progress(p)) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_message(format!(
                            "{} indexed ({} without metadata)",
                            p.indexed, p.metadata_missing
                        ));
                    }
                }
                Event::Pipeline(
                    PipelineEvent::Completed { .. }
                    | PipelineEvent::Cancelled
                    | PipelineEvent::Error { .. },
                ) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(root, &sender);

    // Drop sender to signal the event thread to finish
    drop(sender);
    event_thread.join().ok();

    let summary = result?;

    match output {
        OutputFormat::Pretty => {
            term.write_line("").ok();
            term.write_line(&format!("{} Scan complete", style("✓").green().bold()))
                .ok();
            term.write_line(&format!(
                "  {} files indexed in {:.1}s",
                style(summary.files_indexed).cyan(),
                summary.duration_ms as f64 / 1000.0
            ))
            .ok();
            if summary.metadata_missing > 0 {
                term.write_line(&format!(
                    "  {} without capture metadata",
                    style(summary.metadata_missing).yellow()
                ))
                .ok();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary).unwrap());
        }
    }

    Ok(())
}

fn run_find_hash(db_path: &Path, hash: &str, output: OutputFormat) -> Result<()> {
    let catalog = open_catalog(db_path)?;
    let records = catalog.find_by_hash(hash)?;
    print_records(&records, output);
    Ok(())
}

fn run_find_date(db_path: &Path, date: NaiveDate, output: OutputFormat) -> Result<()> {
    let catalog = open_catalog(db_path)?;
    let records = catalog.find_by_date(date)?;
    print_records(&records, output);
    Ok(())
}

fn run_stats(db_path: &Path, output: OutputFormat) -> Result<()> {
    let catalog = open_catalog(db_path)?;
    let stats = catalog.stats()?;

    match output {
        OutputFormat::Pretty => {
            println!("Records:         {}", stats.total_records);
            println!("Distinct hashes: {}", stats.distinct_hashes);
            if let (Some(earliest), Some(latest)) =
                (stats.earliest_capture, stats.latest_capture)
            {
                println!(
                    "Capture range:   {} .. {}",
                    earliest.format("%Y-%m-%d"),
                    latest.format("%Y-%m-%d")
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats).unwrap());
        }
    }

    Ok(())
}

/// An empty result prints nothing; "not found" is never an error
fn print_records(records: &[IndexedPhoto], output: OutputFormat) {
    match output {
        OutputFormat::Pretty => {
            for record in records {
                print!("{}", format_record(record));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records).unwrap());
        }
    }
}

fn format_record(record: &IndexedPhoto) -> String {
    let taken = record
        .captured_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let camera = record.camera_model.as_deref().unwrap_or("-");

    format!(
        "File:   {}\nHash:   {}\nTaken:  {}\nCamera: {}\n\n",
        record.file_path, record.content_hash, taken, camera
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use chrono::{TimeZone, Utc};
    use photo_catalog::core::hasher;
    use predicates::prelude::*;

    #[test]
    fn db_flag_wins_over_default() {
        let flag = PathBuf::from("/tmp/custom.db");
        assert_eq!(resolve_db_path(Some(flag.clone())), flag);
    }

    #[test]
    fn format_record_shows_dashes_for_absent_fields() {
        let record = IndexedPhoto {
            record_id: 1,
            file_path: "/photos/bare.png".to_string(),
            content_hash: "abc123".to_string(),
            captured_at: None,
            camera_model: None,
            indexed_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };

        let text = format_record(&record);

        assert!(predicate::str::contains("/photos/bare.png").eval(&text));
        assert!(predicate::str::contains("Taken:  -").eval(&text));
        assert!(predicate::str::contains("Camera: -").eval(&text));
    }

    #[test]
    fn format_record_shows_capture_fields() {
        let record = IndexedPhoto {
            record_id: 1,
            file_path: "/photos/a.jpg".to_string(),
            content_hash: "abc123".to_string(),
            captured_at: Some(Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).unwrap()),
            camera_model: Some("CamA".to_string()),
            indexed_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };

        let text = format_record(&record);

        assert!(predicate::str::contains("2023-06-01 10:00:00").eval(&text));
        assert!(predicate::str::contains("Camera: CamA").eval(&text));
    }

    #[test]
    fn scan_indexes_images_and_ignores_text_files() {
        let tree = assert_fs::TempDir::new().unwrap();
        let photo_bytes: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];
        tree.child("photos/a.jpg").write_binary(photo_bytes).unwrap();
        tree.child("photos/c.txt").write_str("not an image").unwrap();

        let db_path = tree.child("catalog.db").path().to_path_buf();
        let root = tree.child("photos").path().to_path_buf();

        run_scan(&db_path, &root, ScanConfig::default(), OutputFormat::Json).unwrap();

        let catalog = open_catalog(&db_path).unwrap();
        let hash = hasher::hash_reader(photo_bytes).unwrap();
        let records = catalog.find_by_hash(&hash).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].file_path.ends_with("a.jpg"));
        assert_eq!(catalog.stats().unwrap().total_records, 1);
    }
}
