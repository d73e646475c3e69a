use std::sync::Arc;

use nb_core::{NewsDefaults, NewsSource};
use nb_inference::Summarizer;

/// Upstream clients built once at startup. A `None` client answers every
/// request with a configuration error.
pub struct AppState {
    pub news: Option<Arc<dyn NewsSource>>,
    pub summarizer: Option<Arc<Summarizer>>,
    pub news_defaults: NewsDefaults,
}

impl AppState {
    pub fn new(
        news: Option<Arc<dyn NewsSource>>,
        summarizer: Option<Arc<Summarizer>>,
        news_defaults: NewsDefaults,
    ) -> Self {
        Self {
            news,
            summarizer,
            news_defaults,
        }
    }
}
