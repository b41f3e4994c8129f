use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

use super::matcher::TermMatcher;
use crate::results::FileMatch;

const BUFFER_CAPACITY: usize = 65536;

/// Scans individual files line by line
#[derive(Debug, Clone)]
pub struct FileProcessor {
    matcher: TermMatcher,
}

impl FileProcessor {
    /// Creates a new FileProcessor with the given matcher
    pub fn new(matcher: TermMatcher) -> Self {
        Self { matcher }
    }

    /// Scans a file and returns its matching line numbers, 1-based and
    /// ascending.
    ///
    /// Lines are read as raw bytes, so invalid UTF-8 never aborts a
    /// scan. A file that cannot be opened or read simply yields no
    /// matches; the failure is logged at debug level and the scan
    /// moves on.
    pub fn scan_file(&self, path: &Path) -> FileMatch {
        trace!("scanning {}", path.display());

        let mut lines = Vec::new();
        match File::open(path) {
            Ok(file) => {
                let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
                let mut buf = Vec::new();
                let mut line_number = 0;
                loop {
                    buf.clear();
                    match reader.read_until(b'\n', &mut buf) {
                        Ok(0) => break,
                        Ok(_) => {
                            line_number += 1;
                            // The newline terminator is not part of the line
                            if buf.last() == Some(&b'\n') {
                                buf.pop();
                            }
                            if self.matcher.is_match(&buf) {
                                lines.push(line_number);
                            }
                        }
                        Err(e) => {
                            debug!("read failed for {}: {}", path.display(), e);
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                debug!("could not open {}: {}", path.display(), e);
            }
        }

        FileMatch {
            path: path.to_path_buf(),
            lines,
        }
    }
}
