use async_trait::async_trait;
use nb_core::logging::{snippet, Logger};
use nb_core::{Article, Error, NewsRequest, NewsSource, Result, Service};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_PAGE_SIZE: u32 = 12;

const LOG_SNIPPET_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub page_size: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Client for the NewsAPI `top-headlines` and `everything` endpoints.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    page_size: u32,
    logger: Logger,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(config: NewsConfig) -> Result<Self> {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: NewsConfig, client: Client) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Configuration("News API key is missing.".to_string()))?;
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::Configuration(format!("Invalid NewsAPI URL {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "Invalid NewsAPI URL {}",
                config.base_url
            )));
        }

        Ok(Self {
            client,
            api_key,
            base_url,
            page_size: config.page_size,
            logger: Logger::new().with_prefix("🗞️").with_prefix("[newsapi]"),
        })
    }

    /// Upstream URL for a request. The API key travels in a header, never here.
    pub fn request_url(&self, request: &NewsRequest) -> Url {
        let mut url = self.base_url.clone();
        let page_size = self.page_size.to_string();
        let endpoint = match request {
            NewsRequest::Search { .. } => "everything",
            NewsRequest::Headlines { .. } => "top-headlines",
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }

        {
            let mut query = url.query_pairs_mut();
            query.clear();
            match request {
                NewsRequest::Search { query: text } => {
                    query
                        .append_pair("q", text)
                        .append_pair("sortBy", "relevancy")
                        .append_pair("pageSize", &page_size);
                }
                NewsRequest::Headlines { country, category } => {
                    query
                        .append_pair("country", country)
                        .append_pair("category", category)
                        .append_pair("pageSize", &page_size);
                }
            }
        }
        url
    }
}

/// Turns one upstream reply into articles or the matching error.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<Vec<Article>> {
    if !status.is_success() {
        return Err(Error::upstream(Service::NewsApi, status.as_u16(), body));
    }

    let data: Value = serde_json::from_str(body).map_err(|_| Error::MalformedUpstreamResponse {
        service: Service::NewsApi,
        raw: body.to_string(),
    })?;

    let records = match data.get("articles") {
        Some(Value::Array(records)) => records.clone(),
        _ => Vec::new(),
    };
    Ok(nb_core::types::displayable_articles(records))
}

#[async_trait]
impl NewsSource for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_articles(&self, request: &NewsRequest) -> Result<Vec<Article>> {
        let url = self.request_url(request);
        self.logger.info(&format!("Fetching {}", url));

        let response = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
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

        match interpret_response(status, &body) {
            Ok(articles) => {
                self.logger.info(&format!("✨ {} displayable articles", articles.len()));
                Ok(articles)
            }
            Err(e) => {
                match &e {
                    Error::Upstream { details, .. } => {
                        self.logger.error(&format!("Upstream error {}: {}", status, details))
                    }
                    Error::MalformedUpstreamResponse { raw, .. } => self
                        .logger
                        .error(&format!("Unparseable body: {}", snippet(raw, LOG_SNIPPET_CHARS))),
                    _ => self.logger.error(&e.to_string()),
                }
                Err(e)
            }
        }
    }
}
