use std::path::PathBuf;

use thiserror::Error;

/// A model artifact could not be loaded or is unusable.
///
/// Fatal at startup: the service must not serve requests without both artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact: {0}")]
    Invalid(String),
}

/// Classification failed for a single request.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("feature dimension mismatch: classifier expects {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("non-finite {0} produced by the classifier")]
    NonFinite(&'static str),
}
