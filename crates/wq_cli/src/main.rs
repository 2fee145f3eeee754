use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use wq_inference::ModelKind;
use wq_quiz::{GenerationOptions, QuizGenerator, QuizService, DEFAULT_QUESTION_COUNT};
use wq_scraper::{handle_command, Scraper, ScraperArgs, ScraperConfig, WikipediaScraper};
use wq_storage::StorageKind;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn Wikipedia articles into multiple-choice quizzes", long_about = None)]
pub struct Cli {
    /// Text generation backend
    #[arg(long, value_enum, default_value_t = ModelKind::Groq, env = "WQ_BACKEND", global = true)]
    model: ModelKind,
    /// Where generated quizzes are kept
    #[arg(long, value_enum, default_value_t = StorageKind::Memory, env = "WQ_STORAGE", global = true)]
    storage: StorageKind,
    /// SQLite database file, used with --storage sqlite
    #[arg(long, env = "WQ_DB_PATH", global = true)]
    db_path: Option<PathBuf>,
    /// Seconds to wait for an article page
    #[arg(long, default_value_t = 30, global = true)]
    fetch_timeout: u64,
    /// Longest article body, in characters, sent to the model
    #[arg(long, default_value_t = wq_inference::DEFAULT_MAX_CHARS, global = true)]
    max_content_chars: usize,
    /// Drop questions whose answer is not one of their options
    #[arg(long, global = true)]
    strict_answers: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate (or fetch the stored) quiz for an article
    Quiz {
        url: String,
        #[arg(long, short = 'n', default_value_t = DEFAULT_QUESTION_COUNT)]
        questions: usize,
    },
    /// Suggest related topics for an article
    Topics { url: String },
    /// Inspect extraction without calling a model
    Scrape(ScraperArgs),
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1", env = "WQ_HOST")]
        host: IpAddr,
        #[arg(long, default_value_t = 8000, env = "PORT")]
        port: u16,
    },
}

impl Cli {
    fn scraper(&self) -> anyhow::Result<Arc<dyn Scraper>> {
        let config = ScraperConfig {
            timeout: Duration::from_secs(self.fetch_timeout),
            ..ScraperConfig::default()
        };
        let scraper = WikipediaScraper::new(&config).context("Failed to set up the scraper")?;
        Ok(Arc::new(scraper))
    }

    fn generator(&self) -> anyhow::Result<QuizGenerator> {
        let config = wq_inference::Config::from_env()?;
        let model = wq_inference::create_model(self.model, &config)
            .context("Failed to initialise the inference model")?;
        info!("🧠 Inference model initialized (using {})", self.model);

        let options = GenerationOptions {
            max_content_chars: self.max_content_chars,
            strict_answers: self.strict_answers,
        };
        Ok(QuizGenerator::with_options(self.scraper()?, model, options))
    }

    async fn service(&self) -> anyhow::Result<QuizService> {
        let storage = wq_storage::create_storage(self.storage, self.db_path.as_deref()).await?;
        info!("🏦 Storage initialized (using {})", self.storage);
        Ok(QuizService::new(self.generator()?, storage))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wq_core::logging::init_logging();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Quiz { url, questions } => {
            let service = cli.service().await?.with_question_count(*questions);
            let quiz = service.generate(url).await?;
            println!("{}", serde_json::to_string_pretty(&quiz)?);
        }
        Commands::Topics { url } => {
            let generator = cli.generator()?;
            let scraper = cli.scraper()?;
            let article = scraper.scrape_article(url.trim()).await?;
            let topics = generator
                .produce_related_topics(&article.title, &article.sections, &article.key_entities)
                .await;
            println!("{}", serde_json::to_string_pretty(&topics)?);
        }
        Commands::Scrape(args) => {
            let scraper = cli.scraper()?;
            handle_command(args.clone(), scraper.as_ref()).await?;
        }
        Commands::Serve { host, port } => {
            let service = cli.service().await?;
            let addr = SocketAddr::new(*host, *port);
            wq_web::serve(wq_web::AppState::new(service), addr).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_quiz_defaults() {
        let cli = Cli::try_parse_from(["wq", "quiz", "https://en.wikipedia.org/wiki/Rust"]).unwrap();
        assert_eq!(cli.model, ModelKind::Groq);
        assert_eq!(cli.storage, StorageKind::Memory);
        match cli.command {
            Commands::Quiz { url, questions } => {
                assert_eq!(url, "https://en.wikipedia.org/wiki/Rust");
                assert_eq!(questions, DEFAULT_QUESTION_COUNT);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wq",
            "serve",
            "--port",
            "9000",
            "--model",
            "dummy",
            "--storage",
            "sqlite",
            "--db-path",
            "/tmp/quizzes.db",
        ])
        .unwrap();
        assert_eq!(cli.model, ModelKind::Dummy);
        assert_eq!(cli.storage, StorageKind::Sqlite);
        assert_eq!(cli.db_path, Some(PathBuf::from("/tmp/quizzes.db")));
        assert!(matches!(cli.command, Commands::Serve { port: 9000, .. }));
    }

    #[test]
    fn test_scrape_subcommands() {
        let cli = Cli::try_parse_from(["wq", "scrape", "validate", "https://en.wikipedia.org/wiki/Rust"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Scrape(_)));
        assert!(Cli::try_parse_from(["wq", "scrape"]).is_err());
    }
}
