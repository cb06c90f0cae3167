//! Configuration management for specden

use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Config file read when no explicit path is given.
pub const DEFAULT_CONFIG_PATH: &str = "configs/train_config.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub paths: PathsConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Root directory downloads land under, one subdirectory per source
    pub root_dir: PathBuf,
    /// Named dataset sources, keyed by destination subdirectory name
    #[serde(default)]
    pub sources: BTreeMap<String, SourceEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Kaggle dataset identifier, e.g. "chrisfilo/urbansound8k"
    #[serde(default)]
    pub kaggle_path: Option<String>,
    /// Pass --unzip so the archive is extracted after download
    #[serde(default)]
    pub extract: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path to the kaggle CLI (auto-detected if not set)
    pub kaggle: Option<PathBuf>,
}

/// Defaults for the model summary command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub height: usize,
    pub width: usize,
    pub in_channels: usize,
    pub base_filters: usize,
}

/// A source entry that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub name: String,
    pub kaggle_path: String,
    pub extract: bool,
}

/// A source entry rejected during validation, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceViolation {
    pub name: String,
    pub reason: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig {
                root_dir: PathBuf::from("data/raw"),
                sources: BTreeMap::new(),
            },
            paths: PathsConfig { kaggle: None },
            model: ModelConfig {
                height: 256,
                width: 256,
                in_channels: 1,
                base_filters: 64,
            },
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Load from default config directory
        if let Some(config_dir) = dirs::config_dir() {
            let default_config = config_dir.join("specden/config.yaml");
            if default_config.exists() {
                figment = figment.merge(Yaml::file(&default_config));
            }
        }

        // Load from specified config file, falling back to the repo default
        match config_file {
            Some(path) => figment = figment.merge(Yaml::file(path)),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    figment = figment.merge(Yaml::file(default_path));
                }
            }
        }

        // Load from environment
        figment = figment.merge(Env::prefixed("SPECDEN_").split("_"));

        figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Get kaggle CLI path, auto-detecting if not configured
    pub fn kaggle_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.paths.kaggle {
            Ok(path.clone())
        } else {
            which::which("kaggle")
                .map_err(|_| ConfigError::InvalidValue("kaggle CLI not found in PATH".to_string()))
        }
    }
}

impl DatasetConfig {
    /// Split the configured source map into validated records and violations.
    ///
    /// Validation runs before any directory creation or process spawning so
    /// every schema problem is reported up front. Entries without a usable
    /// `kaggle_path` become violations; their siblings still fetch.
    pub fn validated_sources(&self) -> (Vec<DatasetSource>, Vec<SourceViolation>) {
        let mut sources = Vec::new();
        let mut violations = Vec::new();

        for (name, entry) in &self.sources {
            match entry.kaggle_path.as_deref() {
                Some(path) if !path.trim().is_empty() => sources.push(DatasetSource {
                    name: name.clone(),
                    kaggle_path: path.to_string(),
                    extract: entry.extract,
                }),
                Some(_) => violations.push(SourceViolation {
                    name: name.clone(),
                    reason: "kaggle_path is empty".to_string(),
                }),
                None => violations.push(SourceViolation {
                    name: name.clone(),
                    reason: "missing kaggle_path".to_string(),
                }),
            }
        }

        (sources, violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Config {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml))
            .extract()
            .unwrap()
    }

    #[test]
    fn parses_full_document() {
        let config = parse(
            r#"
dataset:
  root_dir: data/sets
  sources:
    birds:
      kaggle_path: org/birdsong
      extract: true
    noise:
      kaggle_path: org/street-noise
model:
  base_filters: 32
"#,
        );

        assert_eq!(config.dataset.root_dir, PathBuf::from("data/sets"));
        assert_eq!(config.dataset.sources.len(), 2);

        let birds = &config.dataset.sources["birds"];
        assert_eq!(birds.kaggle_path.as_deref(), Some("org/birdsong"));
        assert!(birds.extract);

        // extract defaults to false when absent
        assert!(!config.dataset.sources["noise"].extract);

        assert_eq!(config.model.base_filters, 32);
        assert_eq!(config.model.height, 256);
    }

    #[test]
    fn empty_document_falls_back_to_defaults() {
        let config = parse("{}");

        assert_eq!(config.dataset.root_dir, PathBuf::from("data/raw"));
        assert!(config.dataset.sources.is_empty());
        assert!(config.paths.kaggle.is_none());
        assert_eq!(config.model.base_filters, 64);
    }

    #[test]
    fn validation_splits_valid_and_violating_entries() {
        let config = parse(
            r#"
dataset:
  root_dir: data/raw
  sources:
    good:
      kaggle_path: org/good-set
      extract: true
    missing: {}
    blank:
      kaggle_path: "  "
"#,
        );

        let (sources, violations) = config.dataset.validated_sources();

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "good");
        assert_eq!(sources[0].kaggle_path, "org/good-set");
        assert!(sources[0].extract);

        assert_eq!(violations.len(), 2);
        let blank = violations.iter().find(|v| v.name == "blank").unwrap();
        assert_eq!(blank.reason, "kaggle_path is empty");
        let missing = violations.iter().find(|v| v.name == "missing").unwrap();
        assert_eq!(missing.reason, "missing kaggle_path");
    }

    #[test]
    fn explicit_kaggle_path_wins_over_detection() {
        let config = parse(
            r#"
paths:
  kaggle: /opt/bin/kaggle
"#,
        );

        assert_eq!(
            config.kaggle_path().unwrap(),
            PathBuf::from("/opt/bin/kaggle")
        );
    }
}
