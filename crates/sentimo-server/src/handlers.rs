//! Route handlers.

use std::any::Any;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{Html, IntoResponse, Response};
use sentimo_core::{HealthBody, PredictBody, is_blank};
use serde_json::Value;
use tracing::{debug, error};

use crate::AppState;
use crate::error::ApiError;

const INDEX_HTML: &str = include_str!("index.html");

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /health`
///
/// Answers as soon as the process is serving; it does not re-check the model.
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody::healthy())
}

/// `POST /predict`
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictBody>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(%rejection, "unreadable request body");
        ApiError::InvalidJson
    })?;

    let text = required_text(&body)?;
    let prediction = state.classifier.classify(text)?;

    Ok(Json(PredictBody::new(text, prediction)))
}

/// Pull a non-blank `text` string out of a request body.
fn required_text(body: &Value) -> Result<&str, ApiError> {
    let field = body
        .as_object()
        .and_then(|fields| fields.get("text"))
        .ok_or(ApiError::MissingText)?;

    match field {
        Value::Null => Err(ApiError::EmptyText),
        Value::String(text) if is_blank(text) => Err(ApiError::EmptyText),
        Value::String(text) => Ok(text.as_str()),
        _ => Err(ApiError::TextNotString),
    }
}

/// Response for a handler that panicked.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    error!(%detail, "handler panicked");
    ApiError::Panic.into_response()
}
