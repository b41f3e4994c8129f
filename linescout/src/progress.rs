//! Progress hooks and shared counters for long-running scans.
//!
//! The core library never prints; callers that want a progress bar or
//! log lines implement [`ScanProgress`] and hand it to the scanner.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Observer for scan progress events.
///
/// Callbacks fire from worker threads, concurrently. Implementations
/// must be thread-safe and should return quickly; slow observers stall
/// the workers that invoke them.
pub trait ScanProgress: Send + Sync {
    /// Called once per regular file found by the walker, before the file
    /// is queued for scanning.
    fn on_file_discovered(&self, _discovered: usize) {}

    /// Called once per file after its scan completes, with the running
    /// totals of scanned and discovered files.
    fn on_file_scanned(&self, _scanned: usize, _discovered: usize) {}
}

/// Reporter that discards all progress events
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ScanProgress for SilentProgress {}

/// Running totals for a scan, shared between the dispatching thread and
/// the workers.
///
/// `files_scanned` trails `files_discovered` while the scan is running
/// and catches up to it once the queue drains. Loads are relaxed; the
/// counters feed progress display, not synchronization.
#[derive(Debug, Default)]
pub struct ScanCounters {
    files_discovered: AtomicUsize,
    files_scanned: AtomicUsize,
}

impl ScanCounters {
    /// Creates counters starting at zero
    pub fn new() -> Self {
        Default::default()
    }

    /// Records one discovered file and returns the new total
    pub fn record_discovered(&self) -> usize {
        self.files_discovered.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Records one scanned file and returns the new total
    pub fn record_scanned(&self) -> usize {
        self.files_scanned.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of regular files the walker has found so far
    pub fn files_discovered(&self) -> usize {
        self.files_discovered.load(Ordering::Relaxed)
    }

    /// Number of files whose scan has completed so far
    pub fn files_scanned(&self) -> usize {
        self.files_scanned.load(Ordering::Relaxed)
    }
}
