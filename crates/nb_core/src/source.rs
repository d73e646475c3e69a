use async_trait::async_trait;
use crate::types::{Article, NewsRequest};
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the displayable articles for a resolved request, in upstream order
    async fn fetch_articles(&self, request: &NewsRequest) -> Result<Vec<Article>>;
}
