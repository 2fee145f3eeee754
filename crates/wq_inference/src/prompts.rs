//! Prompt text sent to the model. Both prompts pin down the exact JSON shape expected back.

use wq_core::KeyEntities;

const MAX_PROMPT_SECTIONS: usize = 10;
const MAX_PROMPT_ENTITIES: usize = 5;
const NOT_AVAILABLE: &str = "N/A";

pub fn quiz_prompt(title: &str, content: &str, num_questions: usize) -> String {
    format!(
        r#"You are an expert quiz generator specializing in educational content. Create a quiz based on the following Wikipedia article.

Article title: {title}

Article content:
{content}

Rules:
1. Write exactly {num_questions} questions using ONLY facts stated in the article.
2. Every question has exactly 4 distinct options and exactly one correct answer.
3. Mix difficulty levels:
   - "easy": a fact stated directly in the article
   - "medium": needs an understanding of concepts or relationships
   - "hard": needs several facts combined
4. Each explanation points at the part of the article that supports the answer.
5. Never invent facts that are not in the article.
6. Wrong options must be plausible but clearly wrong given the article.

Respond with a JSON object of this shape and nothing else:
{{
    "quiz": [
        {{
            "question": "Question text?",
            "options": ["Option A", "Option B", "Option C", "Option D"],
            "answer": "The correct option, copied exactly from options",
            "difficulty": "easy|medium|hard",
            "explanation": "Short explanation citing the article."
        }}
    ]
}}"#
    )
}

pub fn related_topics_prompt(title: &str, sections: &[String], entities: &KeyEntities) -> String {
    let sections = join_or_na(sections, MAX_PROMPT_SECTIONS);
    let people = join_or_na(&entities.people, MAX_PROMPT_ENTITIES);
    let organizations = join_or_na(&entities.organizations, MAX_PROMPT_ENTITIES);
    let locations = join_or_na(&entities.locations, MAX_PROMPT_ENTITIES);

    format!(
        r#"Suggest related topics that would help a reader go deeper into the subject of this Wikipedia article.

Article title: {title}

Article sections: {sections}

Key entities:
- People: {people}
- Organizations: {organizations}
- Locations: {locations}

Rules:
1. Suggest 5 to 7 topics directly connected to the article's subject.
2. Prefer topics that give context, background or closely related concepts.
3. Each topic should be specific enough to be a Wikipedia article title.
4. Do not suggest the article's own title.

Respond with a JSON object of this shape and nothing else:
{{
    "topics": ["Topic 1", "Topic 2", "Topic 3", "Topic 4", "Topic 5"]
}}"#
    )
}

fn join_or_na(items: &[String], limit: usize) -> String {
    if items.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    items
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
