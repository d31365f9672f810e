//! Error types for the scanning module.
//!
//! A scan only ever fails because the file could not be read. We carry
//! the path along so the caller can log something useful.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience type for functions that can fail during scanning.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Things that can go wrong when scanning a watched file.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Couldn't open or read the file. Usually it was deleted or its
    /// permissions changed between the directory listing and the scan.
    #[error("failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Creates an IO error with the path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The file this error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } => path,
        }
    }
}
