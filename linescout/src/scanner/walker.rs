use ignore::WalkBuilder;
use std::path::PathBuf;

use crate::config::ScanConfig;
use crate::filters::should_include_file;

/// Returns an iterator over every regular file under the configured
/// root that passes the extension and ignore-pattern filters.
///
/// Unlike typical source-code walkers, nothing is skipped by default:
/// hidden files are visited and `.gitignore` rules are not honored.
/// Unreadable directory entries are dropped silently, and symlinks are
/// not followed.
pub fn scan_targets(config: &ScanConfig) -> impl Iterator<Item = PathBuf> + '_ {
    WalkBuilder::new(&config.root)
        .standard_filters(false)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| should_include_file(path, &config.file_extensions, &config.ignore_patterns))
}
