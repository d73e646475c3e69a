use std::borrow::Cow;

/// Upper bound on article characters forwarded to the model.
pub const MAX_CONTENT_LENGTH: usize = 12_000;
pub const TRUNCATION_MARKER: &str = "...";

/// Separates the article block from the instructions in the prompt.
pub const ARTICLE_DELIMITER: &str = "---";

/// Keeps the first `max_chars` characters and appends the marker when cut.
pub fn truncate_content(content: &str, max_chars: usize) -> Cow<'_, str> {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => Cow::Owned(format!("{}{}", &content[..idx], TRUNCATION_MARKER)),
        None => Cow::Borrowed(content),
    }
}

pub fn build_prompt(title: &str, content: &str) -> String {
    format!(
        "Read the news article below and complete two tasks:\n\
         1. Summarize it concisely in 2-4 sentences.\n\
         2. List 3-5 keywords that describe it.\n\
         \n\
         Reply with a single JSON object and nothing else. It must have exactly two keys: \
         \"summary\" (a string) and \"keywords\" (an array of strings).\n\
         \n\
         Article:\n\
         {delim}\n\
         Title: \"{title}\"\n\
         Content: \"{content}\"\n\
         {delim}\n\
         \n\
         JSON:",
        delim = ARTICLE_DELIMITER,
        title = title,
        content = content,
    )
}
