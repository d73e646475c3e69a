use async_trait::async_trait;
use crate::Result;

/// Output of a single generation call, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: Option<String>,
    /// Why the upstream withheld its answer, when it says so.
    pub block_reason: Option<String>,
}

impl Generation {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            block_reason: None,
        }
    }

    pub fn blocked(reason: Option<String>) -> Self {
        Self {
            text: None,
            block_reason: reason,
        }
    }
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn name(&self) -> &str;

    /// Run one generation for a single-turn prompt
    async fn generate(&self, prompt: &str) -> Result<Generation>;
}
