//! Error types for specden-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpecdenError>;

#[derive(Error, Debug)]
pub enum SpecdenError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("kaggle CLI not found. Install with: pip install kaggle")]
    KaggleNotFound,

    #[error("kaggle CLI failed with exit code: {0:?}")]
    KaggleFailed(Option<i32>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("No dataset sources defined under dataset.sources")]
    NoSources,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
