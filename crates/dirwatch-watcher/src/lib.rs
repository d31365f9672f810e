//! dirwatch Watcher - directory polling and incremental scanning
//!
//! This crate handles the file system side of things:
//! - Listing the files in the watched directory
//! - Reconciling the tracked set against that listing
//! - Driving the poll, scan, sleep loop until shutdown
//!
//! There's no recursion and no parallelism: one loop, one directory.

mod error;
mod event;
mod listing;
mod poller;
mod reconciler;
mod shutdown;

pub use error::WatchError;
pub use event::WatchEvent;
pub use listing::{list_directory, ListingFilter};
pub use poller::{CycleStats, LoopState, PollingLoop, RunSummary, WatchConfig, DEFAULT_INTERVAL};
pub use reconciler::{reconcile, Reconciled, TrackedSet};
pub use shutdown::ShutdownFlag;
