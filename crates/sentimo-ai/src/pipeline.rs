//! Normalise → vectorize → classify.

use std::path::{Path, PathBuf};

use sentimo_core::{Prediction, Sentiment, normalize};
use tracing::{debug, info};

use crate::classifier::LogisticRegression;
use crate::vectorizer::{Norm, TfidfVectorizer};
use crate::{ArtifactError, InferenceError};

/// Default artifact file names, resolved against the working directory.
pub const DEFAULT_MODEL_FILE: &str = "sentiment_model.json";
pub const DEFAULT_VECTORIZER_FILE: &str = "tfidf_vectorizer.json";

/// Anything that can turn raw review text into a [`Prediction`].
///
/// The HTTP layer depends on this rather than on [`Pipeline`] so handlers can
/// be exercised against stub models.
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Prediction, InferenceError>;
}

/// Locations of the two fitted artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub vectorizer: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL_FILE),
            vectorizer: PathBuf::from(DEFAULT_VECTORIZER_FILE),
        }
    }
}

impl ArtifactPaths {
    /// Both artifacts under one directory, with their default file names.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(DEFAULT_MODEL_FILE),
            vectorizer: dir.join(DEFAULT_VECTORIZER_FILE),
        }
    }
}

/// Summary of the loaded artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub vocabulary_size: usize,
    pub ngram_range: (usize, usize),
    pub use_idf: bool,
    pub sublinear_tf: bool,
    pub norm: Option<Norm>,
    pub stop_words: usize,
    pub classes: [String; 2],
}

/// Fitted vectorizer and classifier, immutable once built.
///
/// Build once at startup and share behind an `Arc`; classification only
/// borrows it.
#[derive(Debug, Clone)]
pub struct Pipeline {
    vectorizer: TfidfVectorizer,
    classifier: LogisticRegression,
}

impl Pipeline {
    /// Pair a vectorizer with a classifier, checking that they agree on the
    /// feature dimension.
    pub fn new(
        vectorizer: TfidfVectorizer,
        classifier: LogisticRegression,
    ) -> Result<Self, ArtifactError> {
        if vectorizer.dim() != classifier.n_features() {
            return Err(ArtifactError::Invalid(format!(
                "vectorizer produces {} features but classifier expects {}",
                vectorizer.dim(),
                classifier.n_features()
            )));
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Load and cross-check both artifacts.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let vectorizer = TfidfVectorizer::load(&paths.vectorizer)?;
        let classifier = LogisticRegression::load(&paths.model)?;
        let pipeline = Self::new(vectorizer, classifier)?;
        info!(
            features = pipeline.vectorizer.dim(),
            "sentiment pipeline ready"
        );
        Ok(pipeline)
    }

    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary {
            vocabulary_size: self.vectorizer.dim(),
            ngram_range: self.vectorizer.ngram_range(),
            use_idf: self.vectorizer.uses_idf(),
            sublinear_tf: self.vectorizer.sublinear_tf(),
            norm: self.vectorizer.norm(),
            stop_words: self.vectorizer.stop_word_count(),
            classes: self.classifier.classes().clone(),
        }
    }
}

impl SentimentClassifier for Pipeline {
    /// Text that normalises to nothing is still classified; the model sees a
    /// zero vector and answers from its intercept.
    fn classify(&self, text: &str) -> Result<Prediction, InferenceError> {
        let cleaned = normalize(text);
        let features = self.vectorizer.transform(&cleaned);

        let label = self.classifier.predict(&features)?;
        let probabilities = self.classifier.predict_proba(&features)?;
        let confidence = probabilities.into_iter().fold(f64::MIN, f64::max);

        let prediction = Prediction {
            sentiment: Sentiment::from_label(label),
            confidence,
        };
        debug!(
            terms = features.nnz(),
            sentiment = %prediction.sentiment,
            confidence = prediction.confidence,
            "classified"
        );
        Ok(prediction)
    }
}
