use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use linescout::{
    scan_with_progress, FileMatch, ScanConfig, ScanError, ScanProgress, ScanReport, SilentProgress,
};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, ScanError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory to search in
    root: PathBuf,

    /// Literal term to search for; an empty term matches every line
    term: String,

    /// File extensions to include (e.g. rs,go,js)
    #[arg(short = 'e', long)]
    extensions: Option<String>,

    /// Paths to skip (glob format)
    #[arg(short, long)]
    ignore: Vec<String>,

    /// Show only statistics, not matches
    #[arg(short, long)]
    stats: bool,

    /// Sort the match listing by path
    #[arg(long)]
    sort: bool,

    /// Number of worker threads (default: CPU cores)
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Path to a YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage problems exit 1; help and version requests exit 0
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let base_config = match cli.config.as_deref() {
        Some(path) => ScanConfig::load_from(Some(path))?,
        None => ScanConfig::load()?,
    };

    let file_extensions = cli.extensions.as_ref().map(|e| {
        e.split(',')
            .map(|s| s.trim().to_string())
            .collect::<Vec<_>>()
    });

    let cli_config = ScanConfig {
        term: cli.term,
        root: cli.root,
        file_extensions,
        ignore_patterns: cli.ignore,
        stats_only: cli.stats,
        sort_matches: cli.sort,
        thread_count: base_config.thread_count,
        log_level: base_config.log_level.clone(),
    };

    let mut config = base_config.merge_with_cli(cli_config);
    if let Some(threads) = cli.threads {
        config.thread_count = threads;
    }

    init_logging(&config.log_level);
    tracing::debug!(
        "scanning with {} worker threads, {} ignore patterns",
        config.thread_count,
        config.ignore_patterns.len()
    );

    println!(
        "Searching for '{}' in {}",
        config.term.cyan(),
        config.root.display()
    );

    let report = if cli.no_progress {
        scan_with_progress(&config, Arc::new(SilentProgress))?
    } else {
        let bar = scan_progress_bar();
        let observer = Arc::new(BarProgress { bar: bar.clone() });
        let report = scan_with_progress(&config, observer)?;
        bar.finish_and_clear();
        report
    };

    print_report(&report, &config);
    Ok(())
}

fn init_logging(level: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("linescout={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Feeds scan events into an indicatif progress bar.
///
/// The bar's length grows as the walker discovers files, so the
/// percentage stays honest even though scanning overlaps discovery.
struct BarProgress {
    bar: ProgressBar,
}

impl ScanProgress for BarProgress {
    fn on_file_discovered(&self, _discovered: usize) {
        self.bar.inc_length(1);
    }

    fn on_file_scanned(&self, _scanned: usize, _discovered: usize) {
        self.bar.inc(1);
    }
}

fn scan_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {percent}% ({pos}/{len} files)")
            .unwrap()
            .progress_chars("=>-"),
    );
    bar
}

fn print_report(report: &ScanReport, config: &ScanConfig) {
    println!(
        "\nSearch completed in {:.2} seconds",
        report.elapsed.as_secs_f64()
    );
    println!(
        "Found {} files containing the search term",
        report.files_matched
    );

    if config.stats_only {
        return;
    }

    if config.sort_matches {
        for file_match in report.sorted_by_path() {
            print_file_match(file_match);
        }
    } else {
        for file_match in &report.matches {
            print_file_match(file_match);
        }
    }
}

fn print_file_match(file_match: &FileMatch) {
    println!("\n{}", file_match.path.display().to_string().blue());
    let lines = file_match
        .lines
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("  Matching lines: {}", lines.green());
}
