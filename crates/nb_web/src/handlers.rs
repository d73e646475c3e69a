use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    Json,
};
use nb_core::{Article, Error, NewsQuery, SummaryResult, NEWS_CATEGORIES};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    pub article_title: Option<String>,
    pub article_content: Option<String>,
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NewsQuery>, QueryRejection>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let source = state
        .news
        .as_ref()
        .ok_or_else(|| Error::Configuration("News API key is missing.".to_string()))?;
    let Query(query) =
        query.map_err(|e| Error::InvalidRequest(format!("Invalid query: {}", e.body_text())))?;

    let request = query.resolve(&state.news_defaults);
    info!("🗞️ News request: {:?}", request);
    let articles = source.fetch_articles(&request).await?;
    Ok(Json(articles))
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummaryResult>, ApiError> {
    let summarizer = state
        .summarizer
        .as_ref()
        .ok_or_else(|| Error::Configuration("Gemini API key is missing.".to_string()))?;
    let Json(body) = body.map_err(|e| {
        Error::InvalidRequest(format!("Invalid request body: {}", e.body_text()))
    })?;

    let title = body.article_title.unwrap_or_default();
    let content = body.article_content.unwrap_or_default();
    let result = summarizer.summarize(&title, &content).await?;
    Ok(Json(result))
}

pub async fn list_categories() -> Json<Vec<&'static str>> {
    Json(NEWS_CATEGORIES.to_vec())
}
