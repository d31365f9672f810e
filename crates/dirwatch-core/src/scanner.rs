//! Scanner module - incremental magic string search.
//!
//! A scan always reads the file from the top, because lines are the unit
//! of progress and we don't keep byte offsets. Lines before the start
//! offset are only counted; lines from the offset onwards are searched.

use crate::error::{Result, ScanError};
use crate::file::ScanResult;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Longest line, newline excluded, a scan will buffer before giving up on a file.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Scans a file for `needle`, skipping the first `start_line` lines.
///
/// Returns the total line count (to use as the next offset) and the
/// 1-based numbers of matching lines. The file handle is closed before
/// returning, whether the scan succeeded or not.
///
/// # Example
///
/// ```no_run
/// use dirwatch_core::scan_file;
/// use std::path::Path;
///
/// let result = scan_file(Path::new("log.txt"), 0, "magic").unwrap();
/// println!("{} lines, matches at {:?}", result.final_line_count, result.matched_lines);
/// ```
pub fn scan_file(path: &Path, start_line: usize, needle: &str) -> Result<ScanResult> {
    let file = File::open(path).map_err(|e| ScanError::io(path, e))?;
    let result =
        scan_reader(BufReader::new(file), start_line, needle).map_err(|e| ScanError::io(path, e))?;

    debug!(
        "Scanned {} from line {}: {} lines, {} matches",
        path.display(),
        start_line,
        result.final_line_count,
        result.matched_lines.len()
    );

    Ok(result)
}

/// Same as [`scan_file`], over any buffered reader.
///
/// Lines are handled as raw bytes, so files that aren't valid UTF-8 are
/// still scanned. A last line without a trailing newline still counts.
/// A line longer than [`MAX_LINE_BYTES`] fails the scan with
/// `InvalidData` instead of being buffered whole.
pub fn scan_reader<R: BufRead>(
    mut reader: R,
    start_line: usize,
    needle: &str,
) -> io::Result<ScanResult> {
    let needle = needle.as_bytes();
    let mut result = ScanResult::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .by_ref()
            .take(MAX_LINE_BYTES as u64 + 1)
            .read_until(b'\n', &mut line)?;
        if read == 0 {
            break;
        }

        let index = result.final_line_count;
        if read > MAX_LINE_BYTES && line.last() != Some(&b'\n') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {} is longer than {} bytes", index + 1, MAX_LINE_BYTES),
            ));
        }
        result.final_line_count += 1;

        if index >= start_line && contains(strip_newline(&line), needle) {
            result.matched_lines.push(index + 1);
        }
    }

    Ok(result)
}

fn strip_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Cursor, Write};
    use tempfile::tempdir;

    fn scan_str(content: &str, start_line: usize, needle: &str) -> ScanResult {
        scan_reader(Cursor::new(content.as_bytes()), start_line, needle).unwrap()
    }

    #[test]
    fn test_finds_magic_line() {
        let result = scan_str("hello\nmagic word\n", 0, "magic");
        assert_eq!(result.final_line_count, 2);
        assert_eq!(result.matched_lines, vec![2]);
    }

    #[test]
    fn test_empty_input_has_zero_lines() {
        let result = scan_str("", 0, "magic");
        assert_eq!(result.final_line_count, 0);
        assert!(!result.has_matches());
    }

    #[test]
    fn test_last_line_without_newline_counts() {
        let result = scan_str("one\ntwo magic", 0, "magic");
        assert_eq!(result.final_line_count, 2);
        assert_eq!(result.matched_lines, vec![2]);
    }

    #[test]
    fn test_lines_before_offset_are_counted_not_matched() {
        let result = scan_str("magic\nmagic\nplain\nmagic\n", 2, "magic");
        assert_eq!(result.final_line_count, 4);
        assert_eq!(result.matched_lines, vec![4]);
    }

    #[test]
    fn test_offset_past_end_reports_nothing() {
        let result = scan_str("magic\n", 5, "magic");
        assert_eq!(result.final_line_count, 1);
        assert!(result.matched_lines.is_empty());
    }

    #[test]
    fn test_match_is_case_sensitive_substring() {
        let result = scan_str("MAGIC\nmagical\nma gic\n", 0, "magic");
        assert_eq!(result.matched_lines, vec![2]);
    }

    #[test]
    fn test_needle_is_not_a_regex() {
        let result = scan_str("a.c\nabc\n", 0, "a.c");
        assert_eq!(result.matched_lines, vec![1]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let result = scan_str("first\r\nmagic\r\n", 0, "magic");
        assert_eq!(result.final_line_count, 2);
        assert_eq!(result.matched_lines, vec![2]);
    }

    #[test]
    fn test_invalid_utf8_does_not_fail() {
        let bytes: &[u8] = b"\xff\xfe garbage\nmagic \xc3\x28\n";
        let result = scan_reader(Cursor::new(bytes), 0, "magic").unwrap();
        assert_eq!(result.final_line_count, 2);
        assert_eq!(result.matched_lines, vec![2]);
    }

    #[test]
    fn test_overlong_line_fails_scan() {
        let mut content = b"magic\n".to_vec();
        content.extend(std::iter::repeat(b'a').take(MAX_LINE_BYTES + 1));
        content.extend_from_slice(b"\nmagic\n");

        let err = scan_reader(Cursor::new(content), 0, "magic").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_line_at_limit_is_scanned() {
        let mut content = vec![b'a'; MAX_LINE_BYTES - 5];
        content.extend_from_slice(b"magic\nnext");

        let result = scan_reader(Cursor::new(content), 0, "magic").unwrap();
        assert_eq!(result.final_line_count, 2);
        assert_eq!(result.matched_lines, vec![1]);
    }

    #[test]
    fn test_overlong_line_in_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.log");
        fs::write(&path, vec![b'a'; MAX_LINE_BYTES + 10]).unwrap();

        let err = scan_file(&path, 0, "magic").unwrap_err();
        assert!(matches!(
            err,
            ScanError::Io { ref source, .. } if source.kind() == io::ErrorKind::InvalidData
        ));
    }

    #[test]
    fn test_empty_needle_matches_every_line() {
        let result = scan_str("a\nb\n", 1, "");
        assert_eq!(result.matched_lines, vec![2]);
    }

    #[test]
    fn test_scan_file_incremental() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "magic A\nmagic B\n").unwrap();

        let first = scan_file(&path, 0, "magic").unwrap();
        assert_eq!(first.matched_lines, vec![1, 2]);
        assert_eq!(first.final_line_count, 2);

        // Unchanged file: nothing new
        let second = scan_file(&path, first.final_line_count, "magic").unwrap();
        assert!(second.matched_lines.is_empty());
        assert_eq!(second.final_line_count, 2);

        let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "magic C").unwrap();
        drop(file);

        let third = scan_file(&path, second.final_line_count, "magic").unwrap();
        assert_eq!(third.matched_lines, vec![3]);
        assert_eq!(third.final_line_count, 3);
    }

    #[test]
    fn test_scan_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.txt");

        let err = scan_file(&path, 0, "magic").unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn test_scan_directory_is_io_error() {
        let dir = tempdir().unwrap();
        assert!(scan_file(dir.path(), 0, "magic").is_err());
    }
}
