//! Watched file representation.
//!
//! A WatchedFile is everything we remember about a file between polling
//! cycles: its name and how far we've read into it.

/// A file in the watched directory and the scan offset reached so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedFile {
    /// File name relative to the watched directory.
    pub name: String,

    /// Number of lines already scanned. The next scan starts here.
    pub last_line_read: usize,
}

impl WatchedFile {
    /// A freshly observed file, nothing read yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_line_read: 0,
        }
    }

    /// Moves the offset forward after a scan.
    ///
    /// The offset never goes backwards. A file that shrank keeps its old
    /// offset until it grows past it again, and returns false so the caller
    /// can mention it.
    pub fn advance(&mut self, final_line_count: usize) -> bool {
        if final_line_count < self.last_line_read {
            return false;
        }
        self.last_line_read = final_line_count;
        true
    }
}

/// Outcome of scanning one file from a given offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Total lines in the file at scan time.
    pub final_line_count: usize,

    /// 1-based line numbers containing the needle, ascending.
    pub matched_lines: Vec<usize>,
}

impl ScanResult {
    pub fn has_matches(&self) -> bool {
        !self.matched_lines.is_empty()
    }
}
