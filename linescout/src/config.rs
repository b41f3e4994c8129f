use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{ScanError, ScanResult};

/// Configuration for a scan.
///
/// # Configuration Locations
///
/// Settings can be loaded from multiple locations, later sources taking
/// precedence:
/// 1. Global `$HOME/.config/linescout/config.yaml`
/// 2. Local `.linescout.yaml` in the current directory
/// 3. Custom config file passed via `--config`
///
/// Command-line arguments override anything loaded from a file; the
/// merging rules live in [`ScanConfig::merge_with_cli`].
///
/// # Configuration Format
///
/// The configuration uses YAML. Example:
/// ```yaml
/// # Literal term to search for
/// term: "TODO"
///
/// # Root directory to search in
/// root: "."
///
/// # File extensions to include
/// file_extensions:
///   - "rs"
///   - "toml"
///
/// # Paths to skip (glob syntax)
/// ignore_patterns:
///   - "target/**"
///   - ".git/**"
///
/// # Show only the summary
/// stats_only: false
///
/// # Sort the match listing by path
/// sort_matches: false
///
/// # Worker thread count (default: CPU cores)
/// thread_count: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Literal term to search for. May be empty, in which case every
    /// line of every scanned file counts as a match.
    #[serde(default)]
    pub term: String,

    /// Root directory to start the scan from
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Optional list of file extensions to include (e.g., ["rs", "toml"]).
    /// If None, all file extensions are included.
    #[serde(default)]
    pub file_extensions: Option<Vec<String>>,

    /// Paths to skip (supports glob syntax)
    /// Examples:
    /// - "target/**": skip everything under target/
    /// - "**/*.min.js": skip all minified JS files
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Whether to show only the summary instead of individual matches
    #[serde(default)]
    pub stats_only: bool,

    /// Whether to sort the match listing by path before display
    #[serde(default)]
    pub sort_matches: bool,

    /// Number of worker threads to scan with.
    /// Defaults to the number of CPU cores if not specified.
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl ScanConfig {
    /// Loads configuration from the default locations
    pub fn load() -> ScanResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration, layering a custom file over the defaults.
    ///
    /// Default-location files are optional; an explicitly requested file
    /// must exist or loading fails.
    pub fn load_from(config_path: Option<&Path>) -> ScanResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let default_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("linescout/config.yaml")),
            // Local config
            Some(PathBuf::from(".linescout.yaml")),
        ];

        for path in default_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ScanError::config_error(e.to_string()))
    }

    /// Merges command-line arguments over configuration file values.
    ///
    /// The positional term and root always come from the command line.
    /// Thread count is resolved by the caller, where an unset flag is
    /// still distinguishable from an explicit value.
    pub fn merge_with_cli(mut self, cli_config: ScanConfig) -> Self {
        self.term = cli_config.term;
        self.root = cli_config.root;
        if cli_config.file_extensions.is_some() {
            self.file_extensions = cli_config.file_extensions;
        }
        if !cli_config.ignore_patterns.is_empty() {
            self.ignore_patterns = cli_config.ignore_patterns;
        }
        if cli_config.stats_only {
            self.stats_only = true;
        }
        if cli_config.sort_matches {
            self.sort_matches = true;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }
}
