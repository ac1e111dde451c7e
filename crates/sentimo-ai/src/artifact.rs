//! JSON artifact reading.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::ArtifactError;

/// Read and deserialize a JSON artifact, attaching the path to any failure.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reject NaN and infinite weights, naming the offending field.
pub(crate) fn ensure_finite(field: &str, values: &[f64]) -> Result<(), ArtifactError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ArtifactError::Invalid(format!(
            "{field}[{i}] is not a finite number"
        ))),
        None => Ok(()),
    }
}
