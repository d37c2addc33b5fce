//! Serialized model artifacts and the pure functions that run them.
//!
//! Models are exported from training as JSON documents; nothing here trains
//! or mutates a model after it is loaded.

mod artifact_error;
pub mod linear;
pub mod pipeline;
pub mod poly;
pub mod schema;
pub mod trees;

pub use artifact_error::ArtifactError;

use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A fitted regressor over an already-encoded feature vector.
pub trait Regressor {
    /// Width of the feature vector the regressor was fitted on.
    fn n_features(&self) -> usize;

    /// Predicts one row. `x.len()` must equal `n_features()`.
    fn predict_row(&self, x: &[f64]) -> f64;
}

/// Reads and deserializes a JSON artifact.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        ArtifactError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::info!(path = %path.display(), "loaded artifact");
    Ok(value)
}
