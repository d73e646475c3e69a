use anyhow::Context;
use clap::Parser;
use nb_core::{Error, NewsDefaults, NewsSource, Result, DEFAULT_CATEGORY, DEFAULT_COUNTRY};
use nb_inference::{InferenceConfig, Summarizer};
use nb_news::{NewsApiClient, NewsArgs, NewsConfig};
use nb_web::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "News feed and article summaries over HTTP", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, env = "NEWS_API_KEY", hide_env_values = true)]
    news_api_key: Option<String>,
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,
    #[arg(long, global = true, env = "NEWS_API_URL", default_value = nb_news::newsapi::DEFAULT_BASE_URL)]
    news_api_url: String,
    #[arg(long, global = true, env = "GEMINI_API_URL", default_value = nb_inference::DEFAULT_BASE_URL)]
    gemini_api_url: String,
    #[arg(long, global = true, env = "NB_MODEL", default_value = "gemini", help = "Model to use for summaries. Available models: gemini (default), dummy")]
    model: String,
    #[arg(long, global = true, env = "NB_MODEL_NAME", default_value = nb_inference::DEFAULT_MODEL_NAME)]
    model_name: String,
    /// Country used for headlines when the client sends none
    #[arg(long = "default-country", global = true, env = "NB_DEFAULT_COUNTRY", default_value = DEFAULT_COUNTRY)]
    default_country: String,
    /// Category used for headlines when the client sends none
    #[arg(long = "default-category", global = true, env = "NB_DEFAULT_CATEGORY", default_value = DEFAULT_CATEGORY)]
    default_category: String,
    #[arg(long, global = true, env = "NB_PAGE_SIZE", default_value_t = nb_news::newsapi::DEFAULT_PAGE_SIZE)]
    page_size: u32,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(long, env = "NB_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
        /// Start even if an API key is missing; the affected endpoint then
        /// answers every request with a configuration error.
        #[arg(long)]
        allow_missing_credentials: bool,
    },
    /// Fetch one page of articles and print it
    News(NewsArgs),
    /// Summarize a single article and print the result
    Summarize {
        #[arg(long)]
        title: String,
        #[arg(long, required_unless_present = "file", conflicts_with = "file")]
        content: Option<String>,
        /// Read the article content from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    fn news_config(&self) -> NewsConfig {
        NewsConfig {
            api_key: self.news_api_key.clone(),
            base_url: self.news_api_url.clone(),
            page_size: self.page_size,
        }
    }

    fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            model: self.model.clone(),
            model_name: self.model_name.clone(),
            api_key: self.gemini_api_key.clone(),
            base_url: self.gemini_api_url.clone(),
            ..Default::default()
        }
    }

    fn news_defaults(&self) -> NewsDefaults {
        NewsDefaults {
            country: self.default_country.clone(),
            category: self.default_category.clone(),
        }
    }
}

fn credential_missing(key: &Option<String>) -> bool {
    key.as_deref().map_or(true, |k| k.trim().is_empty())
}

/// Builds the upstream clients once. Missing credentials fail startup unless
/// `allow_missing_credentials` is set.
fn build_state(
    news_config: NewsConfig,
    inference_config: InferenceConfig,
    news_defaults: NewsDefaults,
    allow_missing_credentials: bool,
) -> Result<AppState> {
    let news: Option<Arc<dyn NewsSource>> =
        if allow_missing_credentials && credential_missing(&news_config.api_key) {
            warn!("⚠️ NEWS_API_KEY is not set, /news will answer with a configuration error");
            None
        } else {
            Some(Arc::new(NewsApiClient::new(news_config)?))
        };

    let needs_key = inference_config.model == "gemini";
    let summarizer =
        if allow_missing_credentials && needs_key && credential_missing(&inference_config.api_key) {
            warn!("⚠️ GEMINI_API_KEY is not set, /summarize will answer with a configuration error");
            None
        } else {
            Some(Arc::new(Summarizer::from_config(&inference_config)?))
        };

    Ok(AppState::new(news, summarizer, news_defaults))
}

async fn read_content(content: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    match (content, file) {
        (Some(content), _) => Ok(content),
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, None) => Err(Error::InvalidRequest("Article content is required.".to_string()).into()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    nb_core::logging::init_logging("info");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { bind, allow_missing_credentials } => {
            let state = build_state(
                cli.news_config(),
                cli.inference_config(),
                cli.news_defaults(),
                *allow_missing_credentials,
            )?;
            if let Some(summarizer) = &state.summarizer {
                info!("🧠 Summaries by {}", summarizer.model_name());
            }
            let app = nb_web::create_app(state);
            nb_web::serve(app, *bind).await?;
        }
        Commands::News(args) => {
            let client = NewsApiClient::new(cli.news_config())?;
            nb_news::handle_command(args.clone(), &client, &cli.news_defaults()).await?;
        }
        Commands::Summarize { title, content, file } => {
            let summarizer = Summarizer::from_config(&cli.inference_config())?;
            let content = read_content(content.clone(), file.clone()).await?;
            let result = summarizer.summarize(title, &content).await?;
            println!("{}\n", result.summary);
            println!("Keywords: {}", result.keywords.join(", "));
        }
    }

    Ok(())
}
