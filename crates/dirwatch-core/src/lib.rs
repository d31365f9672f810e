//! dirwatch Core - incremental line scanning
//!
//! This crate holds the data model shared by the watcher and the CLI,
//! plus the scanner that searches a file for a magic string starting at
//! a remembered line offset.
//!
//! # Example
//!
//! ```no_run
//! use dirwatch_core::{scan_file, WatchedFile};
//! use std::path::Path;
//!
//! let mut file = WatchedFile::new("log.txt");
//! let result = scan_file(Path::new("log.txt"), file.last_line_read, "magic").unwrap();
//! for line in &result.matched_lines {
//!     println!("magic on line {}", line);
//! }
//! file.advance(result.final_line_count);
//! ```

pub mod error;
pub mod file;
pub mod scanner;

pub use error::{Result, ScanError};
pub use file::{ScanResult, WatchedFile};
pub use scanner::{scan_file, scan_reader, MAX_LINE_BYTES};
