//! Events handed to the reporting callback.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Something the polling loop wants the outside world to know about.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    Started {
        dir: PathBuf,
        needle: String,
        interval: Duration,
    },
    FileAdded {
        file: String,
    },
    FileRemoved {
        file: String,
    },
    MagicFound {
        file: String,
        line: usize,
    },
    /// The directory couldn't be listed; the cycle was skipped.
    ListingFailed {
        dir: PathBuf,
        error: String,
    },
    /// One file couldn't be scanned; it stays tracked.
    ScanFailed {
        file: String,
        error: String,
    },
    Stopped {
        uptime: Duration,
        cycles: u64,
    },
}
