use anyhow::Result;
use linescout::{scan, ScanConfig, ScanError, ScanReport};
use std::fs::{self, File};
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn base_config(root: &Path, term: &str) -> ScanConfig {
    ScanConfig {
        term: term.to_string(),
        root: root.to_path_buf(),
        file_extensions: None,
        ignore_patterns: vec![],
        stats_only: false,
        sort_matches: false,
        thread_count: NonZeroUsize::new(4).unwrap(),
        log_level: "warn".to_string(),
    }
}

fn create_test_files(dir: &tempfile::TempDir, file_count: usize, lines_per_file: usize) -> Result<()> {
    for i in 0..file_count {
        let file_path = dir.path().join(format!("test_{}.txt", i));
        let mut file = File::create(file_path)?;
        for j in 0..lines_per_file {
            writeln!(file, "Line {} in file {}: TODO implement this", j, i)?;
            writeln!(file, "Another line {} in file {}: nothing special", j, i)?;
        }
    }
    Ok(())
}

fn match_pairs(report: &ScanReport) -> Vec<(PathBuf, Vec<usize>)> {
    let mut pairs: Vec<_> = report
        .matches
        .iter()
        .map(|m| (m.path.clone(), m.lines.clone()))
        .collect();
    pairs.sort();
    pairs
}

#[test]
fn test_three_file_scenario() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.txt"), "hello world")?;
    fs::write(dir.path().join("b.txt"), "foo\nhello\nbar")?;
    fs::write(dir.path().join("c.txt"), "nothing here")?;

    let report = scan(&base_config(dir.path(), "hello"))?;

    assert_eq!(report.files_scanned, 3);
    assert_eq!(report.files_matched, 2);
    assert_eq!(
        match_pairs(&report),
        vec![
            (dir.path().join("a.txt"), vec![1]),
            (dir.path().join("b.txt"), vec![2]),
        ]
    );
    Ok(())
}

#[test]
fn test_empty_directory() -> Result<()> {
    let dir = tempdir()?;

    let report = scan(&base_config(dir.path(), "anything"))?;

    assert_eq!(report.files_scanned, 0);
    assert_eq!(report.files_matched, 0);
    assert!(report.matches.is_empty());
    Ok(())
}

#[test]
fn test_empty_term_reports_every_line() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("five.txt"), "one\ntwo\nthree\nfour\nfive\n")?;

    let report = scan(&base_config(dir.path(), ""))?;

    assert_eq!(report.files_matched, 1);
    assert_eq!(report.matches[0].lines, vec![1, 2, 3, 4, 5]);
    Ok(())
}

#[test]
fn test_scan_is_idempotent() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 8, 5)?;

    let config = base_config(dir.path(), "TODO");
    let first = match_pairs(&scan(&config)?);
    let second = match_pairs(&scan(&config)?);

    assert!(!first.is_empty());
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_files_scanned_counts_every_regular_file() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("a/b/c"))?;
    fs::write(dir.path().join("top.txt"), "x\n")?;
    fs::write(dir.path().join("a/one.txt"), "x\n")?;
    fs::write(dir.path().join("a/b/two.txt"), "x\n")?;
    fs::write(dir.path().join("a/b/c/three.txt"), "x\n")?;
    fs::write(dir.path().join("a/.hidden"), "x\n")?;

    let report = scan(&base_config(dir.path(), "zzz"))?;

    // Every regular file is scanned, hidden ones included
    assert_eq!(report.files_scanned, 5);
    assert_eq!(report.files_matched, 0);
    Ok(())
}

#[test]
fn test_no_lost_or_duplicate_results_under_contention() -> Result<()> {
    let dir = tempdir()?;
    for i in 0..200 {
        fs::write(
            dir.path().join(format!("f{i:03}.txt")),
            format!("needle {i}\n"),
        )?;
    }

    let mut config = base_config(dir.path(), "needle");
    config.thread_count = NonZeroUsize::new(8).unwrap();
    let report = scan(&config)?;

    assert_eq!(report.files_scanned, 200);
    assert_eq!(report.files_matched, 200);

    let mut paths: Vec<_> = report.matches.iter().map(|m| m.path.clone()).collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 200);
    Ok(())
}

#[test]
fn test_matching_lines_are_ascending() -> Result<()> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("multi.txt"),
        "hello\nskip\nhello again\nskip\nlast hello\n",
    )?;

    let report = scan(&base_config(dir.path(), "hello"))?;

    assert_eq!(report.matches[0].lines, vec![1, 3, 5]);
    Ok(())
}

#[test]
fn test_extension_filter_limits_scan() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("keep.rs"), "let needle = 1;\n")?;
    fs::write(dir.path().join("skip.txt"), "needle here too\n")?;

    let mut config = base_config(dir.path(), "needle");
    config.file_extensions = Some(vec!["rs".to_string()]);
    let report = scan(&config)?;

    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.files_matched, 1);
    assert_eq!(report.matches[0].path, dir.path().join("keep.rs"));
    Ok(())
}

#[test]
fn test_ignore_patterns_limit_scan() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("build"))?;
    fs::write(dir.path().join("build/out.log"), "needle\n")?;
    fs::write(dir.path().join("src.txt"), "needle\n")?;

    let mut config = base_config(dir.path(), "needle");
    config.ignore_patterns = vec!["**/build/**".to_string()];
    let report = scan(&config)?;

    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.matches[0].path, dir.path().join("src.txt"));
    Ok(())
}

#[test]
fn test_single_worker_matches_multi_worker_output() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 12, 4)?;

    let mut single = base_config(dir.path(), "TODO");
    single.thread_count = NonZeroUsize::new(1).unwrap();
    let mut many = base_config(dir.path(), "TODO");
    many.thread_count = NonZeroUsize::new(8).unwrap();

    assert_eq!(match_pairs(&scan(&single)?), match_pairs(&scan(&many)?));
    Ok(())
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("gone");

    let result = scan(&base_config(&missing, "term"));
    assert!(matches!(result, Err(ScanError::RootNotFound(_))));
}
