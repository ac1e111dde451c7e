use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sentimo_ai::InferenceError;
use sentimo_core::ErrorBody;
use thiserror::Error;
use tracing::{error, warn};

/// Failure of a single API request, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request body must be valid JSON")]
    InvalidJson,

    #[error("Missing \"text\" field")]
    MissingText,

    #[error("Text cannot be empty")]
    EmptyText,

    #[error("\"text\" must be a string")]
    TextNotString,

    #[error("{0}")]
    Inference(#[from] InferenceError),

    #[error("Internal server error")]
    Panic,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson | Self::MissingText | Self::EmptyText | Self::TextNotString => {
                StatusCode::BAD_REQUEST
            }
            Self::Inference(_) | Self::Panic => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!(%status, error = %message, "request failed");
        } else {
            warn!(%status, error = %message, "request rejected");
        }
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        for err in [
            ApiError::InvalidJson,
            ApiError::MissingText,
            ApiError::EmptyText,
            ApiError::TextNotString,
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{err}");
        }
    }

    #[test]
    fn inference_errors_keep_their_message() {
        let err = ApiError::from(InferenceError::NonFinite("probability"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "non-finite probability produced by the classifier"
        );
    }

    #[test]
    fn messages_match_wire_contract() {
        assert_eq!(ApiError::MissingText.to_string(), "Missing \"text\" field");
        assert_eq!(ApiError::EmptyText.to_string(), "Text cannot be empty");
    }
}
