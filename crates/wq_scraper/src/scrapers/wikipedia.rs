use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use wq_core::{ArticleRecord, Error, Result};

use crate::extract::extract;
use crate::fetch::{DocumentFetcher, HttpFetcher, ScraperConfig};
use crate::scrapers::Scraper;
use crate::validator::validate_url;

#[derive(Debug, Clone)]
pub struct WikipediaScraper {
    fetcher: Arc<dyn DocumentFetcher>,
}

impl WikipediaScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self::with_fetcher(Arc::new(HttpFetcher::new(config)?)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetches the raw page, refusing ineligible URLs before any request goes out.
    pub async fn fetch_article(&self, url: &str) -> Result<String> {
        if !validate_url(url) {
            return Err(Error::InvalidInput(format!("Invalid Wikipedia URL: {}", url)));
        }
        debug!("Fetching {}", url);
        self.fetcher.fetch(url).await
    }
}

#[async_trait]
impl Scraper for WikipediaScraper {
    fn source(&self) -> &str {
        "Wikipedia"
    }

    fn can_handle(&self, url: &str) -> bool {
        validate_url(url)
    }

    async fn scrape_article(&self, url: &str) -> Result<ArticleRecord> {
        let raw = self.fetch_article(url).await?;
        let article = extract(url, &raw);
        info!(
            "Scraped article: {}, {} sections, content length: {}",
            article.title,
            article.sections.len(),
            article.content.len()
        );
        Ok(article)
    }
}
