use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur while setting up or running a scan,
/// demonstrating Rust's error taxonomy compared to .NET's exceptions.
///
/// # Rust vs .NET Error Handling
///
/// .NET distinguishes fatal and recoverable failures at runtime:
/// ```csharp
/// try {
///     var scanner = new ParallelScanner(root);
///     scanner.Search(term);
/// } catch (DirectoryNotFoundException ex) {
///     // Fatal: bad root
/// } catch (IOException ex) {
///     // Might be fatal, might not - caller can't tell statically
/// }
/// ```
///
/// Rust encodes the taxonomy in the type. Everything in this enum is
/// fatal by construction: per-file read failures never become a
/// `ScanError` at all. They degrade to "scanned, zero matches" inside
/// the worker task, so the only errors a caller can observe are the
/// ones worth stopping for:
/// ```rust,ignore
/// match scan(&config) {
///     Ok(report) => // Full results, every eligible file accounted for
///     Err(ScanError::RootNotFound(path)) => // Bad invocation
///     Err(ScanError::ThreadSpawn(e)) => // Pool could not be built
///     Err(e) => // Config or IO failure during setup
/// }
/// ```
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Search root does not exist: {0}")]
    RootNotFound(PathBuf),
    #[error("Search root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Search root cannot be read: {0}: {1}")]
    RootNotReadable(PathBuf, #[source] io::Error),
    #[error("Failed to spawn worker thread: {0}")]
    ThreadSpawn(#[source] io::Error),
    #[error("Worker pool is shut down and no longer accepts tasks")]
    PoolClosed,
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl ScanError {
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound(path.into())
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory(path.into())
    }

    pub fn root_not_readable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::RootNotReadable(path.into(), source)
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
