use std::fmt;

use async_trait::async_trait;
use nb_core::logging::{snippet, Logger};
use nb_core::{Error, Generation, GenerativeModel, Result, Service};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::InferenceConfig;

const LOG_SNIPPET_CHARS: usize = 500;

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const BLOCK_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Finish reasons that mean the candidate was withheld rather than completed.
const BLOCKING_FINISH_REASONS: [&str; 5] =
    ["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    fn into_generation(self) -> Generation {
        let candidate = self.candidates.into_iter().next().unwrap_or_default();
        let text: String = candidate
            .content
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Generation::text(text);
        }

        let block_reason = self
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .or_else(|| {
                candidate
                    .finish_reason
                    .filter(|reason| BLOCKING_FINISH_REASONS.contains(&reason.as_str()))
            });
        Generation::blocked(block_reason)
    }
}

/// Turns one `generateContent` reply into a generation or the matching error.
fn interpret_response(status: StatusCode, body: &str) -> Result<Generation> {
    if !status.is_success() {
        return Err(Error::upstream(Service::Gemini, status.as_u16(), body));
    }
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|_| Error::MalformedUpstreamResponse {
            service: Service::Gemini,
            raw: body.to_string(),
        })?;
    Ok(response.into_generation())
}

pub struct GeminiModel {
    client: Client,
    api_key: String,
    endpoint: Url,
    model_name: String,
    generation_config: GenerationConfig,
    logger: Logger,
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl GeminiModel {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: &InferenceConfig, client: Client) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Configuration("Gemini API key is missing.".to_string()))?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model_name
        );
        let endpoint = Url::parse(&endpoint).map_err(|e| {
            Error::Configuration(format!("Invalid Gemini URL {}: {}", config.base_url, e))
        })?;

        Ok(Self {
            client,
            api_key,
            endpoint,
            model_name: config.model_name.clone(),
            generation_config: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
            logger: Logger::new().with_prefix("🧠").with_prefix("[gemini]"),
        })
    }

    fn request_body(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: BLOCK_THRESHOLD,
                })
                .collect(),
            generation_config: self.generation_config.clone(),
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, prompt: &str) -> Result<Generation> {
        self.logger.debug(&format!("Prompt of {} characters", prompt.chars().count()));

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                self.logger.error(&format!("Request failed: {}", e));
                Error::Network(e)
            })?;

        let status = response.status();
        let body = response.text().await?;
        self.logger.debug(&format!(
            "Response {}: {}",
            status,
            snippet(&body, LOG_SNIPPET_CHARS)
        ));

        let result = interpret_response(status, &body);
        match &result {
            Ok(generation) if generation.text.is_none() => self.logger.warn(&format!(
                "Empty response, block reason: {:?}",
                generation.block_reason
            )),
            Ok(_) => {}
            Err(e) => self.logger.error(&format!("{} ({})", e, snippet(&body, LOG_SNIPPET_CHARS))),
        }
        result
    }
}
