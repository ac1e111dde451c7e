//! Fitted TF-IDF vectorizer.
//!
//! Reproduces the transform of a vectorizer fitted at training time: the same
//! tokenizer, n-gram range, vocabulary, idf weights and row normalisation. The
//! fitted state comes from a JSON artifact and never changes after load.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ArtifactError;
use crate::artifact::{ensure_finite, read_json};

/// Default token pattern: runs of two or more word characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Longest n-gram an artifact may ask for.
pub const MAX_NGRAM: usize = 16;

/// Row normalisation applied after tf-idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of a fitted vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// term → column index.
    pub vocabulary: HashMap<String, usize>,
    /// Per-column inverse document frequency. Required when `use_idf`.
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_true")]
    pub use_idf: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub binary: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
    #[serde(default)]
    pub token_pattern: Option<String>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

impl VectorizerArtifact {
    /// Unigram, l2-normalised tf-idf over the given vocabulary and idf weights.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        Self {
            vocabulary,
            idf: Some(idf),
            ngram_range: default_ngram_range(),
            lowercase: true,
            use_idf: true,
            sublinear_tf: false,
            binary: false,
            norm: default_norm(),
            stop_words: None,
            token_pattern: None,
        }
    }
}

/// Sparse feature row with a fixed dimensionality.
///
/// Entries are `(column, weight)` pairs sorted by column, zero weights omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight at `column`, zero when absent.
    pub fn get(&self, column: usize) -> f64 {
        self.entries
            .binary_search_by_key(&column, |&(c, _)| c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Dot product with a dense weight vector of the same dimension.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries.iter().map(|&(c, w)| w * dense[c]).sum()
    }
}

/// TF-IDF vectorizer with a fitted vocabulary.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    ngram_range: (usize, usize),
    lowercase: bool,
    sublinear_tf: bool,
    binary: bool,
    norm: Option<Norm>,
    stop_words: HashSet<String>,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Load a fitted vectorizer from a JSON artifact.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact: VectorizerArtifact = read_json(path)?;
        let vectorizer = Self::from_artifact(artifact)?;
        info!(
            vocabulary = vectorizer.dim(),
            ngram_min = vectorizer.ngram_range.0,
            ngram_max = vectorizer.ngram_range.1,
            path = %path.display(),
            "loaded vectorizer"
        );
        Ok(vectorizer)
    }

    /// Validate a fitted-state artifact and build the vectorizer from it.
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, ArtifactError> {
        let dim = artifact.vocabulary.len();
        if dim == 0 {
            return Err(ArtifactError::Invalid(
                "vectorizer is not fitted: vocabulary is empty".into(),
            ));
        }

        // Indices must be a permutation of 0..dim.
        let mut seen = vec![false; dim];
        for (term, &col) in &artifact.vocabulary {
            if col >= dim {
                return Err(ArtifactError::Invalid(format!(
                    "vocabulary index {col} for {term:?} is out of range for {dim} terms"
                )));
            }
            if std::mem::replace(&mut seen[col], true) {
                return Err(ArtifactError::Invalid(format!(
                    "vocabulary index {col} is assigned to more than one term"
                )));
            }
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ArtifactError::Invalid(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        if max_n > MAX_NGRAM {
            return Err(ArtifactError::Invalid(format!(
                "ngram_range ({min_n}, {max_n}) exceeds the {MAX_NGRAM}-gram limit"
            )));
        }

        let idf = if artifact.use_idf {
            let idf = artifact.idf.ok_or_else(|| {
                ArtifactError::Invalid("vectorizer is not fitted: idf weights missing".into())
            })?;
            if idf.len() != dim {
                return Err(ArtifactError::Invalid(format!(
                    "idf has {} weights but vocabulary has {dim} terms",
                    idf.len()
                )));
            }
            ensure_finite("idf", &idf)?;
            Some(idf)
        } else {
            None
        };

        let pattern = artifact
            .token_pattern
            .as_deref()
            .unwrap_or(DEFAULT_TOKEN_PATTERN);
        let token_pattern = Regex::new(pattern)
            .map_err(|e| ArtifactError::Invalid(format!("token_pattern {pattern:?}: {e}")))?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf,
            ngram_range: artifact.ngram_range,
            lowercase: artifact.lowercase,
            sublinear_tf: artifact.sublinear_tf,
            binary: artifact.binary,
            norm: artifact.norm,
            stop_words: artifact.stop_words.unwrap_or_default().into_iter().collect(),
            token_pattern,
        })
    }

    /// Feature dimensionality (vocabulary size).
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }

    pub fn uses_idf(&self) -> bool {
        self.idf.is_some()
    }

    pub fn sublinear_tf(&self) -> bool {
        self.sublinear_tf
    }

    pub fn norm(&self) -> Option<Norm> {
        self.norm
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    /// Transform one document into its tf-idf row.
    ///
    /// Terms outside the vocabulary are ignored, so a document with no known
    /// terms (including the empty document) yields the zero vector.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let doc = if self.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&doc)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        // Raw term counts per column, ordered by column.
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&col) = self.vocabulary.get(&term) {
                    *counts.entry(col).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, count)| {
                let mut tf = if self.binary { 1.0 } else { count };
                if self.sublinear_tf {
                    tf = 1.0 + tf.ln();
                }
                if let Some(idf) = &self.idf {
                    tf *= idf[col];
                }
                (col, tf)
            })
            .filter(|&(_, w)| w != 0.0)
            .collect();

        if let Some(norm) = self.norm {
            let length = match norm {
                Norm::L1 => entries.iter().map(|(_, w)| w.abs()).sum::<f64>(),
                Norm::L2 => entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            };
            if length > 0.0 {
                for (_, w) in &mut entries {
                    *w /= length;
                }
            }
        }

        FeatureVector {
            dim: self.dim(),
            entries,
        }
    }
}
