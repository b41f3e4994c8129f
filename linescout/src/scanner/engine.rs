use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info};

use super::matcher::TermMatcher;
use super::processor::FileProcessor;
use super::walker::scan_targets;
use crate::config::ScanConfig;
use crate::errors::{ScanError, ScanResult};
use crate::pool::WorkerPool;
use crate::progress::{ScanCounters, ScanProgress, SilentProgress};
use crate::results::{FileMatch, ScanReport};

/// Scans the configured directory tree without progress reporting
pub fn scan(config: &ScanConfig) -> ScanResult<ScanReport> {
    scan_with_progress(config, Arc::new(SilentProgress))
}

/// Scans the configured directory tree, queueing one task per file on a
/// worker pool and reporting progress through the given observer.
///
/// The tree is walked exactly once; each file is queued the moment the
/// walker yields it, so scanning overlaps discovery. The call returns
/// after every queued file has been scanned and all workers have been
/// joined.
pub fn scan_with_progress(
    config: &ScanConfig,
    progress: Arc<dyn ScanProgress>,
) -> ScanResult<ScanReport> {
    info!(
        "Starting scan for {:?} in {}",
        config.term,
        config.root.display()
    );

    validate_root(&config.root)?;

    let processor = Arc::new(FileProcessor::new(TermMatcher::new(&config.term)));
    let counters = Arc::new(ScanCounters::new());
    let matches: Arc<Mutex<Vec<FileMatch>>> = Arc::new(Mutex::new(Vec::new()));

    let mut pool = WorkerPool::new(config.thread_count)?;
    let started = Instant::now();

    for path in scan_targets(config) {
        let discovered = counters.record_discovered();
        progress.on_file_discovered(discovered);

        let processor = Arc::clone(&processor);
        let counters = Arc::clone(&counters);
        let matches = Arc::clone(&matches);
        let progress = Arc::clone(&progress);
        pool.submit(move || {
            let file_match = processor.scan_file(&path);
            if !file_match.lines.is_empty() {
                matches.lock().unwrap().push(file_match);
            }
            let scanned = counters.record_scanned();
            progress.on_file_scanned(scanned, counters.files_discovered());
        })?;
    }
    debug!("Queued {} files for scanning", counters.files_discovered());

    pool.wait_idle();
    let elapsed = started.elapsed();
    debug!("Pool executed {} tasks", pool.completed());
    pool.shutdown();

    let mut report = ScanReport::new();
    report.files_scanned = counters.files_scanned();
    report.elapsed = elapsed;
    for file_match in std::mem::take(&mut *matches.lock().unwrap()) {
        report.add_match(file_match);
    }

    info!(
        "Scan complete. Found matches in {} of {} files",
        report.files_matched, report.files_scanned
    );

    Ok(report)
}

fn validate_root(root: &Path) -> ScanResult<()> {
    if !root.exists() {
        return Err(ScanError::root_not_found(root));
    }
    if !root.is_dir() {
        return Err(ScanError::not_a_directory(root));
    }
    // The walker skips unreadable entries, so an unreadable root has to
    // be rejected here
    std::fs::read_dir(root).map_err(|e| ScanError::root_not_readable(root, e))?;
    Ok(())
}
