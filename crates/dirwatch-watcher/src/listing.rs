//! Directory listing.
//!
//! Lists the regular files directly inside the watched directory. No
//! recursion: subdirectories are skipped, not descended into.

use crate::error::WatchError;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Decides which directory entries get tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListingFilter {
    /// Every regular file.
    #[default]
    All,

    /// Only files with this extension (stored without the leading dot).
    Extension(String),
}

impl ListingFilter {
    /// Builds an extension filter. Accepts both "txt" and ".txt"; an empty
    /// extension means no filtering.
    pub fn extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.');
        if ext.is_empty() {
            Self::All
        } else {
            Self::Extension(ext.to_string())
        }
    }

    /// Whether a file called `name` should be tracked.
    ///
    /// Only the last extension is compared, byte for byte: "a.tar.gz" has
    /// extension "gz", and "notes.TXT" doesn't match "txt".
    pub fn accepts(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Extension(ext) => {
                Path::new(name).extension().and_then(|e| e.to_str()) == Some(ext.as_str())
            }
        }
    }
}

/// Lists the names of files in `dir` that pass `filter`.
///
/// Fails with [`WatchError::DirectoryAccess`] when `dir` itself can't be
/// read. Problems with individual entries (a dangling symlink, a name that
/// isn't UTF-8) are logged and the entry is left out.
///
/// # Example
///
/// ```no_run
/// use dirwatch_watcher::{list_directory, ListingFilter};
/// use std::path::Path;
///
/// let names = list_directory(Path::new("."), &ListingFilter::extension("log")).unwrap();
/// println!("{} log files", names.len());
/// ```
pub fn list_directory(dir: &Path, filter: &ListingFilter) -> Result<Vec<String>, WatchError> {
    let meta = std::fs::metadata(dir).map_err(|e| WatchError::directory(dir, e))?;
    if !meta.is_dir() {
        return Err(WatchError::directory(
            dir,
            io::Error::new(io::ErrorKind::Other, "not a directory"),
        ));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    let mut names = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Depth 0 is the watched directory itself
            Err(e) if e.depth() == 0 => return Err(WatchError::directory(dir, e.into())),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = match entry.file_name().to_str() {
            Some(name) => name.to_string(),
            None => {
                warn!("Skipping non UTF-8 file name: {}", entry.path().display());
                continue;
            }
        };

        if filter.accepts(&name) {
            names.push(name);
        }
    }

    debug!("Listed {} files in {}", names.len(), dir.display());

    Ok(names)
}
