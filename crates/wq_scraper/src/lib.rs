pub mod cli;
pub mod extract;
pub mod fetch;
pub mod scrapers;
pub mod validator;

pub use cli::{handle_command, ScraperArgs, ScraperCommands};
pub use extract::extract;
pub use fetch::{DocumentFetcher, HttpFetcher, ScraperConfig, StaticFetcher};
pub use scrapers::{Scraper, WikipediaScraper};
pub use validator::validate_url;

pub mod prelude {
    pub use super::scrapers::Scraper;
    pub use wq_core::{ArticleRecord, Error, Result};
}
