pub mod config;
pub mod errors;
pub mod filters;
pub mod pool;
pub mod progress;
pub mod results;
pub mod scanner;

pub use config::ScanConfig;
pub use errors::{ScanError, ScanResult};
pub use pool::WorkerPool;
pub use progress::{ScanCounters, ScanProgress, SilentProgress};
pub use results::{FileMatch, ScanReport};
pub use scanner::{scan, scan_with_progress};
