//! Turning raw model text into a [`SummaryResult`].
//!
//! Models sometimes wrap JSON in a Markdown fence even when told not to, so
//! the fence is stripped first. This is a guard against formatting drift, the
//! prompt still asks for bare JSON.

use nb_core::{Error, Result, SummaryResult};
use serde_json::Value;

/// Removes a surrounding Markdown code fence (with optional language tag).
pub fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

pub fn parse_summary(text: &str) -> Result<SummaryResult> {
    let value: Value = serde_json::from_str(strip_code_fences(text)).map_err(|_| {
        Error::MalformedAiResponse {
            raw: text.to_string(),
        }
    })?;
    validate_summary(value)
}

pub fn validate_summary(value: Value) -> Result<SummaryResult> {
    let summary = match value.get("summary") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => return Err(invalid_shape("'summary' must be a non-empty string", value)),
    };

    let keywords = match value.get("keywords") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>(),
        _ => return Err(invalid_shape("'keywords' must be an array", value)),
    };

    match keywords {
        Some(keywords) => Ok(SummaryResult { summary, keywords }),
        None => Err(invalid_shape("'keywords' must contain only strings", value)),
    }
}

fn invalid_shape(reason: &str, details: Value) -> Error {
    Error::InvalidAiResponseShape {
        reason: reason.to_string(),
        details,
    }
}
