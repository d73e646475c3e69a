pub mod error;
pub mod logging;
pub mod models;
pub mod source;
pub mod types;

pub use error::{Error, Result, Service};
pub use models::{Generation, GenerativeModel};
pub use source::NewsSource;
pub use types::{
    Article, ArticleSource, NewsDefaults, NewsQuery, NewsRequest, RawArticle, SummaryResult,
    DEFAULT_CATEGORY, DEFAULT_COUNTRY, NEWS_CATEGORIES,
};
