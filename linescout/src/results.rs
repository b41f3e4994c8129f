use std::path::PathBuf;
use std::time::Duration;

/// All matching lines found in a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    /// The path to the file
    pub path: PathBuf,
    /// 1-based numbers of the lines containing the term, in ascending order
    pub lines: Vec<usize>,
}

/// Aggregated outcome of a scan.
///
/// Match records accumulate in completion order, which under a multi-worker
/// scan is nondeterministic. Callers that need a stable order must sort
/// explicitly, e.g. via [`ScanReport::sorted_by_path`].
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Match records, one per file with at least one matching line
    pub matches: Vec<FileMatch>,
    /// Number of regular files scanned, whether they matched or not
    pub files_scanned: usize,
    /// Number of files with at least one matching line
    pub files_matched: usize,
    /// Wall-clock time of the dispatch and processing phase
    pub elapsed: Duration,
}

impl ScanReport {
    /// Creates a new empty report
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a match record; files without matching lines are not recorded
    pub fn add_match(&mut self, file_match: FileMatch) {
        if file_match.lines.is_empty() {
            return;
        }
        self.files_matched += 1;
        self.matches.push(file_match);
    }

    /// Total number of matching lines across all files
    pub fn total_matching_lines(&self) -> usize {
        self.matches.iter().map(|m| m.lines.len()).sum()
    }

    /// Match records sorted by path, for order-independent display
    pub fn sorted_by_path(&self) -> Vec<&FileMatch> {
        let mut sorted: Vec<&FileMatch> = self.matches.iter().collect();
        sorted.sort_by(|a, b| a.path.cmp(&b.path));
        sorted
    }
}
