pub mod cli;
pub mod newsapi;

pub use cli::{handle_command, NewsArgs};
pub use newsapi::{NewsApiClient, NewsConfig};

pub mod prelude {
    pub use super::newsapi::{NewsApiClient, NewsConfig};
    pub use nb_core::{Article, Error, NewsRequest, NewsSource, Result};
}
