use std::sync::Arc;

use nb_core::{Error, GenerativeModel, Result};

use crate::InferenceConfig;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

pub const AVAILABLE_MODELS: [&str; 2] = ["gemini", "dummy"];

pub fn create_model(config: &InferenceConfig) -> Result<Arc<dyn GenerativeModel>> {
    match config.model.as_str() {
        "gemini" => Ok(Arc::new(GeminiModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Configuration(format!(
            "Unknown model: {}. Available models: {}",
            other,
            AVAILABLE_MODELS.join(", ")
        ))),
    }
}
