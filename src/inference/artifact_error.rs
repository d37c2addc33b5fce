use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or checking the artifacts a model is served from.
/// Any of these at startup is fatal.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to load listings from {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("artifact mismatch: {0}")]
    Contract(String),
}
