use async_trait::async_trait;
use wq_core::{ArticleRecord, Result};

pub mod wikipedia;

pub use wikipedia::WikipediaScraper;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Returns the name of the source site
    fn source(&self) -> &str;

    /// Returns true if this scraper accepts the given URL. Pure, never touches the network.
    fn can_handle(&self, url: &str) -> bool;

    /// Fetches and extracts one article.
    async fn scrape_article(&self, url: &str) -> Result<ArticleRecord>;
}
