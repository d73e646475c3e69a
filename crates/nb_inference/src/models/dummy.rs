use std::collections::HashMap;
use std::fmt;

use nb_core::{Generation, GenerativeModel, Result};
use serde_json::json;

use crate::prompt::ARTICLE_DELIMITER;

/// Offline stand-in for a generative model: leading sentences as the summary,
/// most frequent long words as keywords.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Article content between the `Content: "` line and the closing delimiter.
/// The content itself may contain the delimiter.
fn article_text(prompt: &str) -> &str {
    prompt
        .split_once("\nContent: \"")
        .and_then(|(_, rest)| rest.rsplit_once(ARTICLE_DELIMITER))
        .map(|(content, _)| {
            let content = content.trim_end();
            content.strip_suffix('"').unwrap_or(content).trim()
        })
        .unwrap_or(prompt)
}

fn leading_sentences(text: &str, count: usize) -> String {
    let sentences: Vec<&str> = text
        .split_inclusive(|c: char| c == '.' || c == '!' || c == '?')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(count)
        .collect();
    sentences.join(" ")
}

fn frequent_words(text: &str, count: usize) -> Vec<String> {
    let mut seen: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, word) in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 5)
        .map(str::to_lowercase)
        .enumerate()
    {
        seen.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = seen.into_iter().collect();
    ranked.sort_by(|(_, (a_count, a_pos)), (_, (b_count, b_pos))| {
        b_count.cmp(a_count).then(a_pos.cmp(b_pos))
    });
    ranked.into_iter().take(count).map(|(word, _)| word).collect()
}

#[async_trait::async_trait]
impl GenerativeModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<Generation> {
        let text = article_text(prompt);
        let summary = leading_sentences(text, 2);
        if summary.is_empty() {
            return Ok(Generation::blocked(None));
        }
        let reply = json!({
            "summary": summary,
            "keywords": frequent_words(text, 5),
        });
        tracing::debug!("Dummy generation: {}", reply);
        Ok(Generation::text(reply.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::build_prompt;
    use crate::response::parse_summary;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();
        let prompt = build_prompt(
            "Test Article",
            "Lawmakers debated climate policy. Climate groups protested outside. Policy experts weighed in. Nothing else happened.",
        );

        let generation = model.generate(&prompt).await.unwrap();
        let result = parse_summary(generation.text.as_deref().unwrap()).unwrap();
        assert_eq!(
            result.summary,
            "Lawmakers debated climate policy. Climate groups protested outside."
        );
        assert_eq!(result.keywords[0], "climate");
        assert_eq!(result.keywords[1], "policy");
        assert!(result.keywords.len() <= 5);
    }

    #[tokio::test]
    async fn test_content_containing_delimiter() {
        let content = "Part one ends here.\n---\nPart two follows. Part three closes.";
        assert_eq!(article_text(&build_prompt("Split", content)), content);

        let generation = DummyModel::new()
            .generate(&build_prompt("Split", "---\nOpening line. Second line."))
            .await
            .unwrap();
        let result = parse_summary(generation.text.as_deref().unwrap()).unwrap();
        assert_eq!(result.summary, "---\nOpening line. Second line.");
    }

    #[tokio::test]
    async fn test_dummy_model_empty_article() {
        let model = DummyModel::new();
        let generation = model.generate(&build_prompt("Empty", "   ")).await.unwrap();
        assert_eq!(generation, Generation::blocked(None));
    }
}
