//! Runs one URL through scraping, quiz generation and related-topic suggestion.
//!
//! Every stage either hands its output to the next or ends the request with an error. Related
//! topics are the one exception: a failure there is logged and turns into an empty list.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};
use wq_core::{ArticleRecord, Error, InferenceModel, KeyEntities, QuizQuestion, QuizResult, Result};
use wq_inference::{
    parse_json_response, quiz_prompt, related_topics_prompt, truncate_content, validate_quiz,
    validate_topics, ValidationPolicy, DEFAULT_MAX_CHARS,
};
use wq_scraper::Scraper;

pub const MIN_QUESTIONS: usize = 1;
pub const MAX_QUESTIONS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Fetching,
    Extracting,
    Truncating,
    PromptingQuiz,
    InvokingModel(Target),
    ParsingQuiz,
    ValidatingQuiz,
    PromptingTopics,
    ParsingTopics,
    ValidatingTopics,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Quiz,
    Topics,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::InvokingModel(Target::Quiz) => write!(f, "invoking-model(quiz)"),
            Stage::InvokingModel(Target::Topics) => write!(f, "invoking-model(topics)"),
            Stage::Validating => write!(f, "validating"),
            Stage::Fetching => write!(f, "fetching"),
            Stage::Extracting => write!(f, "extracting"),
            Stage::Truncating => write!(f, "truncating"),
            Stage::PromptingQuiz => write!(f, "prompting-quiz"),
            Stage::ParsingQuiz => write!(f, "parsing-quiz"),
            Stage::ValidatingQuiz => write!(f, "validating-quiz"),
            Stage::PromptingTopics => write!(f, "prompting-topics"),
            Stage::ParsingTopics => write!(f, "parsing-topics"),
            Stage::ValidatingTopics => write!(f, "validating-topics"),
            Stage::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Article content beyond this many characters is cut before prompting.
    pub max_content_chars: usize,
    pub strict_answers: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_content_chars: DEFAULT_MAX_CHARS,
            strict_answers: false,
        }
    }
}

#[derive(Clone)]
pub struct QuizGenerator {
    scraper: Arc<dyn Scraper>,
    model: Arc<dyn InferenceModel>,
    options: GenerationOptions,
}

impl fmt::Debug for QuizGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizGenerator")
            .field("scraper", &self.scraper.source())
            .field("model", &self.model.name())
            .field("options", &self.options)
            .finish()
    }
}

fn enter(stage: Stage, subject: &str) {
    debug!("[{}] {}", stage, subject);
}

impl QuizGenerator {
    pub fn new(scraper: Arc<dyn Scraper>, model: Arc<dyn InferenceModel>) -> Self {
        Self::with_options(scraper, model, GenerationOptions::default())
    }

    pub fn with_options(
        scraper: Arc<dyn Scraper>,
        model: Arc<dyn InferenceModel>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            scraper,
            model,
            options,
        }
    }

    pub fn options(&self) -> GenerationOptions {
        self.options
    }

    /// Scrapes `url` and builds a quiz of (ideally) `desired_count` questions plus related topics.
    pub async fn produce_quiz(&self, url: &str, desired_count: usize) -> Result<QuizResult> {
        enter(Stage::Validating, url);
        check_count(desired_count)?;
        if !self.scraper.can_handle(url) {
            return Err(Error::InvalidInput(format!("Invalid Wikipedia URL: {}", url)));
        }

        enter(Stage::Fetching, url);
        let article = self.scraper.scrape_article(url).await?;
        enter(Stage::Extracting, &article.title);

        let quiz = self.generate_quiz(&article, desired_count).await?;
        let related_topics = self
            .produce_related_topics(&article.title, &article.sections, &article.key_entities)
            .await;

        enter(Stage::Done, url);
        info!(
            "Produced {} questions and {} related topics for {}",
            quiz.len(),
            related_topics.len(),
            article.title
        );

        Ok(QuizResult {
            article,
            quiz,
            related_topics,
        })
    }

    /// Asks the model for questions about an already extracted article.
    ///
    /// Fails with `Error::Generation` when nothing survives validation.
    pub async fn generate_quiz(
        &self,
        article: &ArticleRecord,
        count: usize,
    ) -> Result<Vec<QuizQuestion>> {
        check_count(count)?;

        enter(Stage::Truncating, &article.title);
        let content = truncate_content(&article.content, self.options.max_content_chars);
        info!(
            "Generating quiz for '{}' with {} chars of content",
            article.title,
            content.chars().count()
        );

        enter(Stage::PromptingQuiz, &article.title);
        let prompt = quiz_prompt(&article.title, &content, count);

        enter(Stage::InvokingModel(Target::Quiz), self.model.name());
        let raw = self.model.complete(&prompt).await?;

        enter(Stage::ParsingQuiz, &article.title);
        let parsed = parse_json_response(&raw)?;

        enter(Stage::ValidatingQuiz, &article.title);
        let policy = ValidationPolicy {
            strict_answers: self.options.strict_answers,
        };
        let questions = validate_quiz(&parsed, policy);
        if questions.is_empty() {
            return Err(Error::Generation(format!(
                "Model produced no valid quiz questions for '{}'",
                article.title
            )));
        }

        info!("Generated {} valid questions", questions.len());
        Ok(questions)
    }

    /// Suggests further reading. Never fails; problems are logged and yield an empty list.
    pub async fn produce_related_topics(
        &self,
        title: &str,
        sections: &[String],
        entities: &KeyEntities,
    ) -> Vec<String> {
        match self.try_related_topics(title, sections, entities).await {
            Ok(topics) => {
                info!("Generated {} related topics", topics.len());
                topics
            }
            Err(e) => {
                warn!("Related topics unavailable for '{}': {}", title, e);
                Vec::new()
            }
        }
    }

    async fn try_related_topics(
        &self,
        title: &str,
        sections: &[String],
        entities: &KeyEntities,
    ) -> Result<Vec<String>> {
        enter(Stage::PromptingTopics, title);
        let prompt = related_topics_prompt(title, sections, entities);

        enter(Stage::InvokingModel(Target::Topics), self.model.name());
        let raw = self.model.complete(&prompt).await?;

        enter(Stage::ParsingTopics, title);
        let parsed = parse_json_response(&raw)?;

        enter(Stage::ValidatingTopics, title);
        Ok(validate_topics(&parsed, title))
    }
}

fn check_count(count: usize) -> Result<()> {
    if (MIN_QUESTIONS..=MAX_QUESTIONS).contains(&count) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "Question count must be between {} and {}, got {}",
            MIN_QUESTIONS, MAX_QUESTIONS, count
        )))
    }
}
