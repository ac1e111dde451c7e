//! Inference layer: fitted TF-IDF vectorizer and logistic regression classifier,
//! loaded once from JSON artifacts and shared read-only across requests.

mod artifact;
mod classifier;
mod error;
mod pipeline;
mod vectorizer;

pub use classifier::LogisticRegression;
pub use error::{ArtifactError, InferenceError};
pub use pipeline::{
    ArtifactPaths, DEFAULT_MODEL_FILE, DEFAULT_VECTORIZER_FILE, Pipeline, PipelineSummary,
    SentimentClassifier,
};
pub use vectorizer::{FeatureVector, Norm, TfidfVectorizer, VectorizerArtifact};
