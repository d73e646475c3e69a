use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_CATEGORY: &str = "general";

/// Categories offered to the client, in display order.
pub const NEWS_CATEGORIES: [&str; 7] = [
    "general",
    "business",
    "technology",
    "entertainment",
    "health",
    "science",
    "sports",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: String,
}

/// A displayable article as returned to the client.
///
/// Optional fields serialize as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub source: Option<ArticleSource>,
    pub published_at: Option<String>,
    pub url_to_image: Option<String>,
}

impl Article {
    pub fn is_summarizable(&self) -> bool {
        self.summary_text().is_some()
    }

    /// Text submitted for summarization: the content, else the description.
    pub fn summary_text(&self) -> Option<&str> {
        non_empty(&self.content).or_else(|| non_empty(&self.description))
    }
}

/// A field of an unexpected JSON type reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// An article record as the upstream listing reports it. Every field is
/// optional and mistyped fields read as `None`; `is_displayable` decides
/// whether the record is kept.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub source: Option<RawSource>,
    #[serde(default, deserialize_with = "lenient")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url_to_image: Option<String>,
}

impl RawArticle {
    /// Deserializes one upstream record. Only a record that is not a JSON
    /// object yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }

    pub fn is_displayable(&self) -> bool {
        non_empty(&self.url).is_some()
            && non_empty(&self.title).is_some()
            && (non_empty(&self.description).is_some() || non_empty(&self.content).is_some())
    }

    pub fn into_article(self) -> Option<Article> {
        if !self.is_displayable() {
            return None;
        }
        let source = self.source.and_then(|s| match s.name {
            Some(name) if !name.is_empty() => Some(ArticleSource { id: s.id, name }),
            _ => None,
        });
        Some(Article {
            title: self.title?,
            description: self.description,
            content: self.content,
            url: self.url?,
            source,
            published_at: self.published_at,
            url_to_image: self.url_to_image,
        })
    }
}

/// Keeps upstream order and drops every record that is not displayable.
pub fn displayable_articles(records: Vec<Value>) -> Vec<Article> {
    records
        .into_iter()
        .filter_map(RawArticle::from_value)
        .filter_map(RawArticle::into_article)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub keywords: Vec<String>,
}

/// Listing parameters used when the client leaves them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDefaults {
    pub country: String,
    pub category: String,
}

impl Default for NewsDefaults {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// Query parameters of a news request as sent by the client.
///
/// `keywords` is a comma separated list the client kept from a previous
/// summary; it turns into an `OR` search when `q` is absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsQuery {
    pub category: Option<String>,
    pub country: Option<String>,
    pub q: Option<String>,
    pub keywords: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsRequest {
    Search { query: String },
    Headlines { country: String, category: String },
}

impl NewsQuery {
    pub fn search_text(&self) -> Option<String> {
        if let Some(q) = trimmed(&self.q) {
            return Some(q.to_string());
        }
        let keywords: Vec<&str> = trimmed(&self.keywords)?
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            None
        } else {
            Some(keywords.join(" OR "))
        }
    }

    pub fn resolve(&self, defaults: &NewsDefaults) -> NewsRequest {
        if let Some(query) = self.search_text() {
            return NewsRequest::Search { query };
        }
        NewsRequest::Headlines {
            country: trimmed(&self.country).unwrap_or(defaults.country.as_str()).to_string(),
            category: trimmed(&self.category).unwrap_or(defaults.category.as_str()).to_string(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_displayable_filter_keeps_order() {
        let records = vec![
            json!({"title": "First", "url": "https://a.example/1", "description": "d"}),
            json!({"title": "No url", "description": "d"}),
            json!({"title": "", "url": "https://a.example/2", "content": "c"}),
            json!({"title": "No text", "url": "https://a.example/3", "description": null, "content": ""}),
            json!({"title": 42, "url": "https://a.example/4", "content": "c"}),
            json!({"title": "Second", "url": "https://a.example/5", "content": "c"}),
        ];

        let articles = displayable_articles(records);
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_mistyped_optional_fields_read_as_null() {
        let records = vec![
            json!({"title": "Kept", "url": "https://a.example/1", "description": "d",
                   "source": "Reuters"}),
            json!({"title": "Kept2", "url": "https://a.example/2", "description": "d",
                   "urlToImage": {"src": "x"}, "publishedAt": 1714557600}),
            json!({"title": "Kept3", "url": "https://a.example/3", "description": "d",
                   "source": {"id": 7, "name": "Wire"}, "content": ["c"]}),
            json!({"title": "Dropped", "url": {"href": "https://a.example/4"}, "description": "d"}),
            json!("not an object"),
        ];

        let articles = displayable_articles(records);
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Kept", "Kept2", "Kept3"]);

        assert_eq!(articles[0].source, None);
        assert_eq!(articles[1].url_to_image, None);
        assert_eq!(articles[1].published_at, None);
        assert_eq!(
            articles[2].source,
            Some(ArticleSource { id: None, name: "Wire".into() })
        );
        assert_eq!(articles[2].content, None);
    }

    #[test]
    fn test_article_serializes_nulls() {
        let article = RawArticle {
            title: Some("Title".into()),
            url: Some("https://a.example".into()),
            description: Some("desc".into()),
            ..Default::default()
        }
        .into_article()
        .unwrap();

        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Title",
                "description": "desc",
                "content": null,
                "url": "https://a.example",
                "source": null,
                "publishedAt": null,
                "urlToImage": null,
            })
        );
    }

    #[test]
    fn test_source_mapping() {
        let raw = RawArticle::from_value(json!({
            "title": "T",
            "url": "https://a.example",
            "content": "c",
            "source": {"id": null, "name": "Reuters"},
            "publishedAt": "2024-05-01T10:00:00Z",
            "urlToImage": "https://a.example/img.png",
        }))
        .unwrap();
        let article = raw.into_article().unwrap();
        assert_eq!(
            article.source,
            Some(ArticleSource { id: None, name: "Reuters".into() })
        );
        assert_eq!(article.published_at.as_deref(), Some("2024-05-01T10:00:00Z"));

        let raw = RawArticle::from_value(json!({
            "title": "T",
            "url": "https://a.example",
            "content": "c",
            "source": {"id": "x"},
        }))
        .unwrap();
        assert_eq!(raw.into_article().unwrap().source, None);
    }

    #[test]
    fn test_summary_text_prefers_content() {
        let mut article = Article {
            title: "T".into(),
            description: Some("description".into()),
            content: Some("content".into()),
            url: "https://a.example".into(),
            source: None,
            published_at: None,
            url_to_image: None,
        };
        assert_eq!(article.summary_text(), Some("content"));

        article.content = Some(String::new());
        assert_eq!(article.summary_text(), Some("description"));

        article.description = None;
        assert!(!article.is_summarizable());
    }

    #[test]
    fn test_query_resolution() {
        let defaults = NewsDefaults::default();

        let query = NewsQuery::default();
        assert_eq!(
            query.resolve(&defaults),
            NewsRequest::Headlines { country: "us".into(), category: "general".into() }
        );

        let query = NewsQuery {
            category: Some("science".into()),
            country: Some("".into()),
            ..Default::default()
        };
        assert_eq!(
            query.resolve(&defaults),
            NewsRequest::Headlines { country: "us".into(), category: "science".into() }
        );

        let query = NewsQuery {
            category: Some("science".into()),
            country: Some("gb".into()),
            q: Some("rust lang".into()),
            keywords: Some("ignored".into()),
        };
        assert_eq!(
            query.resolve(&defaults),
            NewsRequest::Search { query: "rust lang".into() }
        );
    }

    #[test]
    fn test_keywords_become_or_search() {
        let query = NewsQuery {
            keywords: Some("climate, , energy ,policy".into()),
            ..Default::default()
        };
        assert_eq!(
            query.resolve(&NewsDefaults::default()),
            NewsRequest::Search { query: "climate OR energy OR policy".into() }
        );

        let query = NewsQuery {
            keywords: Some(" , ".into()),
            ..Default::default()
        };
        assert!(matches!(
            query.resolve(&NewsDefaults::default()),
            NewsRequest::Headlines { .. }
        ));
    }
}
