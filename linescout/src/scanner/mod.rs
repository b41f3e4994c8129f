//! This module implements the parallel directory scan, demonstrating how
//! a .NET-style data-parallel loop maps onto an explicit worker pool.
//!
//! # .NET vs Rust Parallel Scanning
//!
//! In .NET, the scan loop would lean on `Parallel.ForEach` and let the
//! runtime decide scheduling:
//! ```csharp
//! Parallel.ForEach(EnumerateFiles(root), file => {
//!     var lines = ScanFile(file, term);
//!     if (lines.Any()) {
//!         lock (results) { results.Add(new FileMatch(file, lines)); }
//!     }
//! });
//! ```
//!
//! Here scheduling is explicit: the tree is walked once, each file is
//! submitted to a fixed pool as it is discovered, and the pool is asked
//! to quiesce before the report is assembled:
//! ```rust,ignore
//! for path in scan_targets(config) {
//!     pool.submit(move || state.scan_one(path))?;
//! }
//! pool.wait_idle();
//! ```
//!
//! # Shared Results
//!
//! .NET would typically collect through PLINQ and merge at the end. The
//! workers here push completed [`FileMatch`](crate::results::FileMatch)
//! records into a single `Mutex<Vec<_>>`; a record is pushed at most
//! once per file, so the critical section is short and uncontended
//! compared to the file IO around it.
//!
//! # Completion
//!
//! Where .NET code reaches for `CountdownEvent`, completion falls out of
//! the pool itself: the scan is done exactly when the queue is empty and
//! no worker holds a task, which is what
//! [`WorkerPool::wait_idle`](crate::pool::WorkerPool::wait_idle) waits
//! for. Progress counters are advisory and never used to detect
//! completion.

pub mod engine;
pub mod matcher;
pub mod processor;
pub mod walker;

pub use engine::{scan, scan_with_progress};
pub use matcher::TermMatcher;
pub use processor::FileProcessor;
