//! Bulk dataset downloader driving the kaggle CLI

use crate::config::{Config, DatasetSource, SourceViolation};
use crate::error::{ConfigError, FetchError, SpecdenError};
use std::io;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Fetcher {
    kaggle_path: PathBuf,
    root_dir: PathBuf,
}

/// Per-source result of a fetch-all run.
#[derive(Debug)]
pub struct FetchOutcome {
    pub name: String,
    pub target_dir: PathBuf,
    pub result: Result<(), FetchError>,
}

/// Aggregate result of a [`fetch_all_sources`] run.
#[derive(Debug)]
pub struct FetchReport {
    pub violations: Vec<SourceViolation>,
    pub outcomes: Vec<FetchOutcome>,
}

impl FetchReport {
    /// True when the run stopped early because the kaggle CLI is missing.
    pub fn aborted(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o.result, Err(FetchError::KaggleNotFound)))
    }
}

impl Fetcher {
    pub fn new(kaggle_path: PathBuf, root_dir: PathBuf) -> Self {
        Self {
            kaggle_path,
            root_dir,
        }
    }

    /// Destination directory for a named source
    pub fn target_dir(&self, source: &DatasetSource) -> PathBuf {
        self.root_dir.join(&source.name)
    }

    /// Argument vector passed to the kaggle CLI for one source
    pub fn download_args(source: &DatasetSource, target_dir: &Path) -> Vec<String> {
        let mut args = vec![
            "datasets".to_string(),
            "download".to_string(),
            "-d".to_string(),
            source.kaggle_path.clone(),
            "-p".to_string(),
            target_dir.display().to_string(),
        ];

        if source.extract {
            args.push("--unzip".to_string());
        }

        args
    }

    /// Download one source into `<root_dir>/<name>`
    ///
    /// The directory is created first (idempotent, parents included). The
    /// kaggle CLI inherits stdout/stderr, so its own progress output streams
    /// through to the terminal.
    pub async fn fetch(&self, source: &DatasetSource) -> Result<PathBuf, FetchError> {
        let target_dir = self.target_dir(source);
        tokio::fs::create_dir_all(&target_dir).await?;

        info!("Downloading {} ({})", source.name, source.kaggle_path);

        let args = Self::download_args(source, &target_dir);
        debug!("kaggle {}", args.join(" "));

        let status = Command::new(&self.kaggle_path)
            .args(&args)
            .status()
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => FetchError::KaggleNotFound,
                _ => FetchError::Io(e),
            })?;

        if !status.success() {
            return Err(FetchError::KaggleFailed(status.code()));
        }

        info!("Downloaded {} to {}", source.name, target_dir.display());
        Ok(target_dir)
    }

    /// Download every source in order, one at a time
    ///
    /// A failed download is recorded and the run continues with the next
    /// source; partial success across the set is an accepted outcome. A
    /// missing kaggle CLI halts the run, since every later invocation would
    /// fail the same way.
    pub async fn fetch_all(&self, sources: &[DatasetSource]) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::with_capacity(sources.len());

        for source in sources {
            let result = self.fetch(source).await.map(|_| ());
            let halt = matches!(result, Err(FetchError::KaggleNotFound));

            outcomes.push(FetchOutcome {
                name: source.name.clone(),
                target_dir: self.target_dir(source),
                result,
            });

            if halt {
                break;
            }
        }

        outcomes
    }
}

/// Load configuration, validate the source map, and download every valid
/// source sequentially.
///
/// Schema violations are reported before any directory creation or process
/// spawning; an empty source map and a missing kaggle CLI are hard stops.
pub async fn fetch_all_sources(config_path: Option<&Path>) -> Result<FetchReport, SpecdenError> {
    let config = Config::load(config_path)?;

    if config.dataset.sources.is_empty() {
        return Err(ConfigError::NoSources.into());
    }

    let (sources, violations) = config.dataset.validated_sources();
    for violation in &violations {
        warn!("Skipping source '{}': {}", violation.name, violation.reason);
    }

    if sources.is_empty() {
        return Err(ConfigError::InvalidValue("no usable dataset sources".to_string()).into());
    }

    let kaggle_path = config
        .kaggle_path()
        .map_err(|_| FetchError::KaggleNotFound)?;
    debug!("using kaggle CLI at {}", kaggle_path.display());

    info!(
        "Fetching {} dataset(s) into {}",
        sources.len(),
        config.dataset.root_dir.display()
    );

    let fetcher = Fetcher::new(kaggle_path, config.dataset.root_dir.clone());
    let outcomes = fetcher.fetch_all(&sources).await;

    Ok(FetchReport {
        violations,
        outcomes,
    })
}
