pub mod api;
pub mod prediction;
pub mod text;

pub use api::{ErrorBody, HealthBody, PredictBody};
pub use prediction::{Prediction, Sentiment};
pub use text::{CleanedText, is_blank, is_whitespace, normalize};
