//! Directory walking implementation using walkdir.

use super::filter::ImageFilter;
use crate::error::ScanError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the tree walker
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
    /// Skip unreadable entries instead of aborting the scan
    ///
    /// Off by default: the first unreadable entry fails the whole scan.
    /// When on, each skipped entry is logged at warn level and the walk
    /// continues, so a "successful" scan may not have visited every subtree.
    pub skip_unreadable: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: false,
            max_depth: None,
            extensions: None,
            skip_unreadable: false,
        }
    }
}

/// Walker implementation using the walkdir crate
///
/// Yields candidate image files lazily, in a deterministic (file-name
/// sorted) order for a given tree. Directories are traversed, never
/// yielded.
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new walker with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = ImageFilter::new().with_hidden(config.include_hidden);

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self { config, filter }
    }

    /// Lazily enumerate candidate files under `root`
    ///
    /// Fails immediately when `root` is not an existing directory. The
    /// returned iterator yields `Err` on the first unreadable entry unless
    /// `skip_unreadable` is set.
    pub fn files(&self, root: &Path) -> Result<ScanIter, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        // Prune hidden directories at descent time rather than filtering
        // their contents one file at a time. Depth 0 is the root itself,
        // which is always entered.
        let include_hidden = self.config.include_hidden;
        let inner = walker.into_iter().filter_entry(move |entry| {
            include_hidden || entry.depth() == 0 || !is_hidden_name(entry.file_name())
        });

        Ok(ScanIter {
            inner: Box::new(inner),
            filter: self.filter.clone(),
            skip_unreadable: self.config.skip_unreadable,
        })
    }
}

fn is_hidden_name(name: &std::ffi::OsStr) -> bool {
    name.to_str().map(|n| n.starts_with('.')).unwrap_or(false)
}

fn classify_walk_error(error: walkdir::Error) -> ScanError {
    let path = error.path().map(|p| p.to_path_buf()).unwrap_or_default();

    if error.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::PermissionDenied) {
        ScanError::PermissionDenied { path }
    } else {
        let message = error.to_string();
        let source = error
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message));
        ScanError::ReadEntry { path, source }
    }
}

/// Lazy iterator over candidate image files
pub struct ScanIter {
    inner: Box<dyn Iterator<Item = walkdir::Result<walkdir::DirEntry>> + Send>,
    filter: ImageFilter,
    skip_unreadable: bool,
}

impl Iterator for ScanIter {
    type Item = Result<PathBuf, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    if !self.filter.should_include(entry.path()) {
                        continue;
                    }
                    return Some(Ok(entry.into_path()));
                }
                Err(error) => {
                    let error = classify_walk_error(error);
                    if self.skip_unreadable {
                        tracing::warn!("skipping unreadable entry: {error}");
                        continue;
                    }
                    return Some(Err(error));
                }
            }
        }
    }
}
