pub mod models;
pub mod prompt;
pub mod response;
pub mod summarizer;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL_NAME: &str = "gemini-1.5-flash-latest";

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Which implementation to build, see [`models::AVAILABLE_MODELS`].
    pub model: String,
    pub model_name: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub max_content_length: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model: "gemini".to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.5,
            max_output_tokens: 250,
            max_content_length: prompt::MAX_CONTENT_LENGTH,
        }
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::summarizer::Summarizer;
    pub use super::InferenceConfig;
    pub use nb_core::{Error, Generation, GenerativeModel, Result, SummaryResult};
}

pub use models::create_model;
pub use summarizer::Summarizer;
