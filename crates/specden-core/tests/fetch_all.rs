//! Fetch loop tests against a stub kaggle executable
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use specden_core::config::DatasetSource;
use specden_core::error::{ConfigError, FetchError, SpecdenError};
use specden_core::fetcher::{fetch_all_sources, Fetcher};

fn source(name: &str, kaggle_path: &str, extract: bool) -> DatasetSource {
    DatasetSource {
        name: name.to_string(),
        kaggle_path: kaggle_path.to_string(),
        extract,
    }
}

fn stub_kaggle(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("kaggle");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();

    path
}

#[tokio::test]
async fn fetches_every_source_with_the_expected_args() {
    let tmp = tempfile::tempdir().unwrap();
    let record = tmp.path().join("calls.txt");
    let tool = stub_kaggle(
        tmp.path(),
        &format!("echo \"$@\" >> {}", record.display()),
    );
    let root = tmp.path().join("data");

    let fetcher = Fetcher::new(tool, root.clone());
    let sources = [
        source("birds", "org/birdsong", true),
        source("noise", "org/street-noise", false),
    ];

    let outcomes = fetcher.fetch_all(&sources).await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.result.is_ok()));
    assert!(root.join("birds").is_dir());
    assert!(root.join("noise").is_dir());

    let calls = fs::read_to_string(&record).unwrap();
    let lines: Vec<&str> = calls.lines().collect();
    assert_eq!(lines.len(), 2);

    assert!(lines[0].starts_with("datasets download -d org/birdsong -p"));
    assert!(lines[0].ends_with("--unzip"));
    assert!(lines[1].contains("-d org/street-noise"));
    assert!(!lines[1].contains("--unzip"));
}

#[tokio::test]
async fn refetching_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = stub_kaggle(tmp.path(), "exit 0");
    let root = tmp.path().join("data");

    let fetcher = Fetcher::new(tool, root.clone());
    let sources = [source("birds", "org/birdsong", false)];

    assert!(fetcher.fetch_all(&sources).await[0].result.is_ok());
    assert!(fetcher.fetch_all(&sources).await[0].result.is_ok());

    // still exactly one directory under the root
    let entries: Vec<_> = fs::read_dir(&root).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert!(root.join("birds").is_dir());
}

#[tokio::test]
async fn failed_download_does_not_stop_siblings() {
    let tmp = tempfile::tempdir().unwrap();
    // exit 1 for the first dataset id only; $4 is the -d value
    let tool = stub_kaggle(tmp.path(), "case \"$4\" in org/bad) exit 1;; esac\nexit 0");
    let root = tmp.path().join("data");

    let fetcher = Fetcher::new(tool, root.clone());
    let sources = [
        source("bad", "org/bad", false),
        source("good", "org/good", false),
    ];

    let outcomes = fetcher.fetch_all(&sources).await;

    assert_eq!(outcomes.len(), 2);
    assert!(matches!(
        outcomes[0].result,
        Err(FetchError::KaggleFailed(Some(1)))
    ));
    assert!(outcomes[1].result.is_ok());

    // the failing source still got its directory before the tool ran
    assert!(root.join("bad").is_dir());
    assert!(root.join("good").is_dir());
}

#[tokio::test]
async fn invalid_entries_are_skipped_while_siblings_fetch() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = stub_kaggle(tmp.path(), "exit 0");
    let config = tmp.path().join("train_config.yaml");
    fs::write(
        &config,
        format!(
            "dataset:\n  root_dir: {root}/data\n  sources:\n    broken: {{}}\n    good:\n      kaggle_path: org/good\npaths:\n  kaggle: {tool}\n",
            root = tmp.path().display(),
            tool = tool.display()
        ),
    )
    .unwrap();

    let report = fetch_all_sources(Some(&config)).await.unwrap();

    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].name, "broken");

    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].name, "good");
    assert!(report.outcomes[0].result.is_ok());

    assert!(tmp.path().join("data/good").is_dir());
    assert!(!tmp.path().join("data/broken").exists());
}

#[tokio::test]
async fn fetch_all_sources_rejects_an_empty_source_map() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("train_config.yaml");
    fs::write(
        &config,
        format!("dataset:\n  root_dir: {}/data\n", tmp.path().display()),
    )
    .unwrap();

    let err = fetch_all_sources(Some(&config)).await.unwrap_err();

    assert!(matches!(
        err,
        SpecdenError::Config(ConfigError::NoSources)
    ));
    assert!(!tmp.path().join("data").exists());
}

#[tokio::test]
async fn fetch_all_sources_requires_a_usable_source() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("train_config.yaml");
    fs::write(
        &config,
        format!(
            "dataset:\n  root_dir: {}/data\n  sources:\n    broken:\n      extract: true\n",
            tmp.path().display()
        ),
    )
    .unwrap();

    let err = fetch_all_sources(Some(&config)).await.unwrap_err();

    // the lone source has no kaggle_path, so nothing is fetchable
    assert!(matches!(
        err,
        SpecdenError::Config(ConfigError::InvalidValue(_))
    ));
    assert!(!tmp.path().join("data").exists());
}

#[tokio::test]
async fn missing_tool_halts_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = tmp.path().join("no-such-kaggle");
    let root = tmp.path().join("data");

    let fetcher = Fetcher::new(tool, root.clone());
    let sources = [
        source("first", "org/first", false),
        source("second", "org/second", false),
    ];

    let outcomes = fetcher.fetch_all(&sources).await;

    // the run stops at the first spawn failure; later sources are untouched
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        outcomes[0].result,
        Err(FetchError::KaggleNotFound)
    ));
    assert!(!root.join("second").exists());
}
