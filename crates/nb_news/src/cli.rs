use clap::Args;
use nb_core::{Article, NewsDefaults, NewsQuery, NewsSource, Result};
use tracing::info;

/// One-off news fetch from the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct NewsArgs {
    /// Headline category (e.g. technology). Ignored when searching.
    #[arg(long)]
    pub category: Option<String>,
    /// Two-letter country code for headlines. Ignored when searching.
    #[arg(long)]
    pub country: Option<String>,
    /// Free-text search; switches to relevance-sorted search mode
    #[arg(long, short)]
    pub q: Option<String>,
    /// Comma separated keywords searched with OR when no query is given
    #[arg(long)]
    pub keywords: Option<String>,
}

impl From<NewsArgs> for NewsQuery {
    fn from(args: NewsArgs) -> Self {
        NewsQuery {
            category: args.category,
            country: args.country,
            q: args.q,
            keywords: args.keywords,
        }
    }
}

pub fn format_article(article: &Article) -> String {
    let source = article
        .source
        .as_ref()
        .map(|s| format!(" ({})", s.name))
        .unwrap_or_default();
    let marker = if article.is_summarizable() { "📰" } else { "📄" };
    format!("{} {}{} - {}", marker, article.title, source, article.url)
}

pub async fn handle_command(
    args: NewsArgs,
    source: &dyn NewsSource,
    defaults: &NewsDefaults,
) -> Result<Vec<Article>> {
    let request = NewsQuery::from(args).resolve(defaults);
    info!("🗞️ Fetching {:?} from {}", request, source.name());

    let articles = source.fetch_articles(&request).await?;
    println!("Found {} articles", articles.len());
    for article in &articles {
        println!("{}", format_article(article));
    }
    Ok(articles)
}
