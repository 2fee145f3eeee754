use clap::{Args, Subcommand};
use serde_json::json;
use wq_core::{ArticleRecord, Result};

use crate::scrapers::Scraper;

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Fetch one article and print what the extractor found
    Url {
        url: String,
        /// Include the full extracted body text
        #[arg(long)]
        content: bool,
    },
    /// Check whether a URL is an eligible article page, without fetching it
    Validate { url: String },
}

pub async fn handle_command(args: ScraperArgs, scraper: &dyn Scraper) -> Result<()> {
    match args.command {
        ScraperCommands::Url { url, content } => {
            let article = scraper.scrape_article(url.trim()).await?;
            println!("{}", serde_json::to_string_pretty(&article_view(&article, content))?);
        }
        ScraperCommands::Validate { url } => {
            if scraper.can_handle(&url) {
                println!("✅ {} is a {} article", url, scraper.source());
            } else {
                println!("❌ {} is not an eligible {} article", url, scraper.source());
            }
        }
    }
    Ok(())
}

/// Everything but the raw markup, which is only kept for auditing.
fn article_view(article: &ArticleRecord, with_content: bool) -> serde_json::Value {
    let mut view = json!({
        "url": article.url,
        "title": article.title,
        "summary": article.summary,
        "sections": article.sections,
        "key_entities": article.key_entities,
        "content_length": article.content.chars().count(),
    });
    if with_content {
        view["content"] = json!(article.content);
    }
    view
}
