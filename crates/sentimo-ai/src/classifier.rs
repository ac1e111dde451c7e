//! Binary logistic regression over tf-idf features.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::artifact::{ensure_finite, read_json};
use crate::vectorizer::FeatureVector;
use crate::{ArtifactError, InferenceError};

/// On-disk form of a fitted classifier.
///
/// `coef` and `intercept` are accepted either flat (`[..]`, `0.1`) or in the
/// one-row matrix shape training libraries export (`[[..]]`, `[0.1]`).
#[derive(Debug, Deserialize)]
struct ClassifierArtifact {
    classes: Vec<String>,
    coef: Coef,
    intercept: Intercept,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coef {
    Row(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Intercept {
    Scalar(f64),
    Vector(Vec<f64>),
}

/// Fitted binary logistic regression.
///
/// `classes[1]` is predicted when the decision function is positive.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    classes: [String; 2],
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    /// Build a classifier from fitted weights.
    pub fn new(classes: Vec<String>, coef: Vec<f64>, intercept: f64) -> Result<Self, ArtifactError> {
        let classes: [String; 2] = classes.try_into().map_err(|c: Vec<String>| {
            ArtifactError::Invalid(format!(
                "classifier must have exactly 2 classes, found {}",
                c.len()
            ))
        })?;
        if classes[0] == classes[1] {
            return Err(ArtifactError::Invalid(format!(
                "classifier classes must be distinct, both are {:?}",
                classes[0]
            )));
        }
        if coef.is_empty() {
            return Err(ArtifactError::Invalid(
                "classifier is not fitted: coef is empty".into(),
            ));
        }
        ensure_finite("coef", &coef)?;
        ensure_finite("intercept", &[intercept])?;

        Ok(Self {
            classes,
            coef,
            intercept,
        })
    }

    /// Load a fitted classifier from a JSON artifact.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact: ClassifierArtifact = read_json(path)?;

        let coef = match artifact.coef {
            Coef::Row(row) => row,
            Coef::Matrix(mut rows) if rows.len() == 1 => rows.remove(0),
            Coef::Matrix(rows) => {
                return Err(ArtifactError::Invalid(format!(
                    "binary classifier needs one coef row, found {}",
                    rows.len()
                )));
            }
        };
        let intercept = match artifact.intercept {
            Intercept::Scalar(b) => b,
            Intercept::Vector(v) if v.len() == 1 => v[0],
            Intercept::Vector(v) => {
                return Err(ArtifactError::Invalid(format!(
                    "binary classifier needs one intercept, found {}",
                    v.len()
                )));
            }
        };

        let classifier = Self::new(artifact.classes, coef, intercept)?;
        info!(
            features = classifier.n_features(),
            classes = ?classifier.classes,
            path = %path.display(),
            "loaded classifier"
        );
        Ok(classifier)
    }

    pub fn classes(&self) -> &[String; 2] {
        &self.classes
    }

    /// Number of input features the weights expect.
    pub fn n_features(&self) -> usize {
        self.coef.len()
    }

    /// Signed distance to the decision boundary.
    pub fn decision_function(&self, x: &FeatureVector) -> Result<f64, InferenceError> {
        if x.dim() != self.coef.len() {
            return Err(InferenceError::DimensionMismatch {
                expected: self.coef.len(),
                got: x.dim(),
            });
        }
        let z = self.intercept + x.dot(&self.coef);
        if !z.is_finite() {
            return Err(InferenceError::NonFinite("decision value"));
        }
        Ok(z)
    }

    /// Predicted class label.
    pub fn predict(&self, x: &FeatureVector) -> Result<&str, InferenceError> {
        let z = self.decision_function(x)?;
        Ok(&self.classes[usize::from(z > 0.0)])
    }

    /// Per-class probabilities, ordered like [`classes`](Self::classes).
    pub fn predict_proba(&self, x: &FeatureVector) -> Result<[f64; 2], InferenceError> {
        let p = sigmoid(self.decision_function(x)?);
        if !p.is_finite() {
            return Err(InferenceError::NonFinite("probability"));
        }
        Ok([1.0 - p, p])
    }
}

/// Logistic function without overflow for large negative inputs.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
