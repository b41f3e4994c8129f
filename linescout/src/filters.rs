//! Path-based filters applied while walking the directory tree.
//!
//! By default every regular file under the search root is scanned; these
//! filters only take effect when the caller configures extensions or
//! ignore patterns.

use glob::Pattern;
use std::path::Path;

/// Checks if a file passes the extension filter
pub fn has_valid_extension(path: &Path, extensions: &Option<Vec<String>>) -> bool {
    match extensions {
        None => true,
        Some(exts) => {
            if let Some(ext) = path.extension() {
                if let Some(ext_str) = ext.to_str() {
                    return exts
                        .iter()
                        .map(|e| e.trim_start_matches('.'))
                        .any(|e| e.eq_ignore_ascii_case(ext_str));
                }
            }
            false
        }
    }
}

/// Checks if a path matches any of the ignore patterns
pub fn should_ignore(path: &Path, ignore_patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy();

    ignore_patterns.iter().any(|pattern| {
        if let Ok(p) = Pattern::new(pattern) {
            // Normalize separators so patterns written with '/' match on Windows
            let normalized_path = path_str.replace('\\', "/");
            p.matches(&normalized_path)
        } else {
            false
        }
    })
}

/// Determines whether a discovered file should be queued for scanning
pub fn should_include_file(
    path: &Path,
    extensions: &Option<Vec<String>>,
    ignore_patterns: &[String],
) -> bool {
    has_valid_extension(path, extensions) && !should_ignore(path, ignore_patterns)
}
