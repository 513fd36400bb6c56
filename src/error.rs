use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the matching core
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatcherError {
    /// Scoring was attempted before `fit`
    #[error("matcher must be fitted before scoring")]
    NotTrained,
    #[error("cannot fit a matcher on an empty corpus")]
    EmptyCorpus,
}

/// Errors of the corpus, configuration and chat layers
#[derive(Debug, Error)]
pub enum FaqError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported corpus format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("corpus has no entries")]
    EmptyCorpus,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

pub type Result<T, E = FaqError> = std::result::Result<T, E>;
