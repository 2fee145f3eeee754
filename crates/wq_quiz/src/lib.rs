pub mod generator;
pub mod service;

pub use generator::{GenerationOptions, QuizGenerator, Stage, MAX_QUESTIONS, MIN_QUESTIONS};
pub use service::{QuizService, DEFAULT_HISTORY_LIMIT, DEFAULT_QUESTION_COUNT};

pub mod prelude {
    pub use super::{GenerationOptions, QuizGenerator, QuizService};
    pub use wq_core::{Error, QuizResponse, QuizResult, Result};
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::json;

    pub const ARTICLE_URL: &str = "https://en.wikipedia.org/wiki/Alan_Turing";

    pub const ARTICLE_HTML: &str = r#"<html><head><title>Alan Turing - Wikipedia</title></head><body>
        <h1 id="firstHeading">Alan Turing</h1>
        <div id="mw-content-text"><div class="mw-parser-output">
            <p>Alan Mathison Turing was an English mathematician, computer scientist and logician.</p>
            <h2><span class="mw-headline" id="Early_life">Early life</span></h2>
            <p>Turing was born in Maida Vale, London, while his father was on leave from India.</p>
            <p>He studied at <a href="/wiki/King%27s_College,_Cambridge">King's College</a> and
               <a href="/wiki/Princeton_University">Princeton University</a>.</p>
            <h2><span class="mw-headline" id="References">References</span></h2>
            <p>Hodges, Andrew (1983). Alan Turing: The Enigma.</p>
        </div></div>
    </body></html>"#;

    pub fn question(n: usize) -> serde_json::Value {
        json!({
            "question": format!("Question {n}?"),
            "options": ["London", "Paris", "Berlin", "Rome"],
            "answer": "London",
            "difficulty": "easy",
            "explanation": "Born in Maida Vale, London."
        })
    }

    pub fn quiz_reply(count: usize) -> String {
        let quiz: Vec<_> = (1..=count).map(question).collect();
        json!({ "quiz": quiz }).to_string()
    }

    pub fn topics_reply() -> String {
        r#"Related topics:
```json
{"topics": ["Alan Turing", "Enigma machine", "Bletchley Park", "Turing machine"]}
```"#
            .to_string()
    }
}
