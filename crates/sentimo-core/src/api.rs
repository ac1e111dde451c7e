//! JSON bodies exchanged over the HTTP API.
//!
//! Shared by the server and by `sentimo classify --json`, which prints the
//! exact body `/predict` would return.

use serde::{Deserialize, Serialize};

use crate::prediction::{Prediction, Sentiment};

/// Successful `POST /predict` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictBody {
    /// The text as submitted, before normalisation.
    pub text: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
}

impl PredictBody {
    pub fn new(text: impl Into<String>, prediction: Prediction) -> Self {
        Self {
            text: text.into(),
            sentiment: prediction.sentiment,
            confidence: prediction.confidence,
        }
    }
}

/// `{"error": "..."}` body for every 4xx/5xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// `GET /health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
}

impl HealthBody {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_body_shape() {
        let body = PredictBody::new(
            "Loved it!",
            Prediction {
                sentiment: Sentiment::Positive,
                confidence: 0.75,
            },
        );
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "text": "Loved it!",
                "sentiment": "positive",
                "confidence": 0.75
            })
        );
    }

    #[test]
    fn error_body_shape() {
        let json = serde_json::to_string(&ErrorBody::new("Text cannot be empty")).unwrap();
        assert_eq!(json, r#"{"error":"Text cannot be empty"}"#);
    }

    #[test]
    fn health_body_shape() {
        let json = serde_json::to_string(&HealthBody::healthy()).unwrap();
        assert_eq!(json, r#"{"status":"healthy"}"#);
    }
}
