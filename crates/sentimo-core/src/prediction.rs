//! Classifier output types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Map a model class label onto a sentiment.
    ///
    /// Only the exact label `"positive"` is positive; every other class the
    /// model may emit is treated as negative.
    pub fn from_label(label: &str) -> Self {
        if label == "positive" {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub sentiment: Sentiment,
    /// Highest per-class probability, in `[0, 1]`.
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_positive_label_is_positive() {
        assert_eq!(Sentiment::from_label("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("negative"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("Positive"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("pos"), Sentiment::Negative);
    }

    #[test]
    fn serialises_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"positive\""
        );
        let parsed: Sentiment = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(parsed, Sentiment::Negative);
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(Sentiment::Negative.to_string(), "negative");
    }
}
