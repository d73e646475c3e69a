use std::sync::Arc;

use nb_core::logging::{snippet, Logger};
use nb_core::{Error, GenerativeModel, Result, SummaryResult};

use crate::prompt::{build_prompt, truncate_content};
use crate::response::parse_summary;
use crate::{create_model, InferenceConfig};

const LOG_SNIPPET_CHARS: usize = 500;

fn failure_line(err: &Error, text: &str) -> String {
    format!("{} Raw response: {}", err, snippet(text, LOG_SNIPPET_CHARS))
}

/// Summary and keywords for one article through a single generation call.
pub struct Summarizer {
    model: Arc<dyn GenerativeModel>,
    max_content_length: usize,
    logger: Logger,
}

impl Summarizer {
    pub fn new(model: Arc<dyn GenerativeModel>, max_content_length: usize) -> Self {
        Self {
            model,
            max_content_length,
            logger: Logger::new().with_prefix("🧠").with_prefix("[summarize]"),
        }
    }

    pub fn from_config(config: &InferenceConfig) -> Result<Self> {
        Ok(Self::new(create_model(config)?, config.max_content_length))
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn summarize(&self, title: &str, content: &str) -> Result<SummaryResult> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "Article title and content are required.".to_string(),
            ));
        }

        let content = truncate_content(content, self.max_content_length);
        self.logger.info(&format!(
            "Summarizing \"{}\" ({} characters) with {}",
            title,
            content.chars().count(),
            self.model.name()
        ));

        let generation = self.model.generate(&build_prompt(title, &content)).await?;
        let text = match generation.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                self.logger.error(&format!(
                    "Empty or blocked response, block reason: {:?}",
                    generation.block_reason
                ));
                return Err(Error::EmptyOrBlockedResponse {
                    block_reason: generation.block_reason,
                });
            }
        };
        self.logger
            .debug(&format!("Raw response: {}", snippet(&text, LOG_SNIPPET_CHARS)));

        let result = parse_summary(&text);
        match &result {
            Ok(summary) => self.logger.info(&format!(
                "✨ Summary ready with {} keywords",
                summary.keywords.len()
            )),
            Err(e) => self.logger.error(&failure_line(e, &text)),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::MAX_CONTENT_LENGTH;
    use async_trait::async_trait;
    use nb_core::Generation;
    use std::sync::Mutex;

    /// Answers with a canned generation and records every prompt.
    struct CannedModel {
        reply: Generation,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedModel {
        fn new(reply: Generation) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerativeModel for CannedModel {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate(&self, prompt: &str) -> Result<Generation> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn summarizer(model: &Arc<CannedModel>) -> Summarizer {
        Summarizer::new(model.clone(), MAX_CONTENT_LENGTH)
    }

    #[tokio::test]
    async fn test_fenced_reply() {
        let model = CannedModel::new(Generation::text(
            "```json\n{\"summary\":\"S\",\"keywords\":[\"a\",\"b\"]}\n```",
        ));
        let result = summarizer(&model).summarize("Title", "Body.").await.unwrap();
        assert_eq!(result.summary, "S");
        assert_eq!(result.keywords, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_missing_fields_skip_model() {
        let model = CannedModel::new(Generation::text("{}"));
        let summarizer = summarizer(&model);

        for (title, content) in [("", "Body"), ("Title", ""), ("  ", "Body")] {
            let result = summarizer.summarize(title, content).await;
            assert!(matches!(result, Err(Error::InvalidRequest(_))));
        }
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_long_content_truncated_in_prompt() {
        let model = CannedModel::new(Generation::text(r#"{"summary":"S","keywords":[]}"#));
        let content = format!("{}{}", "x".repeat(MAX_CONTENT_LENGTH), "TAIL");
        summarizer(&model).summarize("Title", &content).await.unwrap();

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        let expected = format!("Content: \"{}...\"", "x".repeat(MAX_CONTENT_LENGTH));
        assert!(prompts[0].contains(&expected));
        assert!(!prompts[0].contains("TAIL"));
    }

    #[tokio::test]
    async fn test_blocked_reply() {
        let model = CannedModel::new(Generation::blocked(Some("SAFETY".to_string())));
        match summarizer(&model).summarize("Title", "Body").await {
            Err(Error::EmptyOrBlockedResponse { block_reason }) => {
                assert_eq!(block_reason.as_deref(), Some("SAFETY"))
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let model = CannedModel::new(Generation::text("   "));
        assert!(matches!(
            summarizer(&model).summarize("Title", "Body").await,
            Err(Error::EmptyOrBlockedResponse { block_reason: None })
        ));
    }

    #[tokio::test]
    async fn test_shape_errors() {
        let model = CannedModel::new(Generation::text(r#"{"summary":"S"}"#));
        assert!(matches!(
            summarizer(&model).summarize("Title", "Body").await,
            Err(Error::InvalidAiResponseShape { .. })
        ));

        let model = CannedModel::new(Generation::text("Sure! Here is the summary."));
        assert!(matches!(
            summarizer(&model).summarize("Title", "Body").await,
            Err(Error::MalformedAiResponse { .. })
        ));
    }

    #[test]
    fn test_failure_line_is_bounded() {
        let text = "z".repeat(LOG_SNIPPET_CHARS * 4);
        let err = Error::MalformedAiResponse { raw: text.clone() };
        let line = failure_line(&err, &text);
        assert!(line.starts_with("AI response was not in the expected JSON format."));
        assert_eq!(line.matches('z').count(), LOG_SNIPPET_CHARS);
    }

    #[tokio::test]
    async fn test_from_config_with_dummy() {
        let config = InferenceConfig {
            model: "dummy".to_string(),
            ..Default::default()
        };
        let summarizer = Summarizer::from_config(&config).unwrap();
        assert_eq!(summarizer.model_name(), "Dummy");

        let result = summarizer
            .summarize("Budget", "The council approved the budget. Schools get more funding.")
            .await
            .unwrap();
        assert!(result.summary.starts_with("The council approved the budget."));
    }
}
