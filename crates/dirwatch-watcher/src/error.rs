//! Errors surfaced while polling.
//!
//! Neither variant is fatal to the polling loop. A directory error skips
//! the rest of the cycle, a scan error skips one file.

use dirwatch_core::ScanError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    /// The watched directory vanished, isn't a directory, or can't be read.
    #[error("cannot list directory '{path}': {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single tracked file couldn't be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl WatchError {
    pub fn directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryAccess {
            path: path.into(),
            source,
        }
    }
}
