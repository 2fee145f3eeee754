//! Turns a fetched Wikipedia page into an [`ArticleRecord`].
//!
//! Each field degrades on its own: a missing container yields an empty value for that field
//! rather than failing the whole record.

pub mod dom;
pub mod entities;

use scraper::{ElementRef, Html};
use wq_core::ArticleRecord;

use dom::{all_matching, attr, first_matching, visible_text};
pub use entities::extract_entities;

pub(crate) const PARSER_OUTPUT: &str = "div.mw-parser-output";
const CONTENT_TEXT: &str = "div#mw-content-text";
const TOC_HEADING_ID: &str = "mw-toc-heading";

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const TITLE_SUFFIX: &str = " - Wikipedia";

/// Trailer headings after which the article body is considered boilerplate.
pub const EXCLUDED_SECTIONS: &[&str] = &[
    "See also",
    "References",
    "External links",
    "Notes",
    "Further reading",
    "Bibliography",
];

const SUMMARY_SCAN_LIMIT: usize = 10;
const SUMMARY_PARAGRAPHS: usize = 2;
const SUMMARY_MIN_CHARS: usize = 50;
const CONTENT_MIN_CHARS: usize = 20;

pub fn extract(url: &str, raw_markup: &str) -> ArticleRecord {
    let document = Html::parse_document(raw_markup);

    ArticleRecord {
        url: url.to_string(),
        title: extract_title(&document),
        summary: extract_summary(&document),
        sections: extract_sections(&document),
        key_entities: extract_entities(&document),
        content: extract_content(&document),
        raw_markup: raw_markup.to_string(),
    }
}

pub fn extract_title(document: &Html) -> String {
    let root = document.root_element();

    if let Some(heading) = first_matching(root, "h1#firstHeading") {
        let title = visible_text(heading);
        if !title.is_empty() {
            return title;
        }
    }

    if let Some(title_tag) = first_matching(root, "title") {
        let title = visible_text(title_tag).replace(TITLE_SUFFIX, "");
        let title = title.trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }

    UNKNOWN_TITLE.to_string()
}

pub fn extract_summary(document: &Html) -> String {
    let Some(body) = parser_output(document) else {
        return String::new();
    };

    all_matching(body, "p")
        .into_iter()
        .take(SUMMARY_SCAN_LIMIT)
        .map(visible_text)
        .filter(|text| text.chars().count() > SUMMARY_MIN_CHARS)
        .take(SUMMARY_PARAGRAPHS)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn extract_sections(document: &Html) -> Vec<String> {
    all_matching(document.root_element(), "h2")
        .into_iter()
        .filter_map(heading_label)
        .filter(|label| !is_boilerplate(label))
        .collect()
}

/// Body text up to, and excluding, the first boilerplate trailer section.
pub fn extract_content(document: &Html) -> String {
    let Some(body) = parser_output(document) else {
        return String::new();
    };

    let mut parts = Vec::new();
    for element in all_matching(body, "p, h2, h3, li") {
        if element.value().name() == "h2" {
            if let Some(label) = heading_label(element) {
                if is_boilerplate(&label) {
                    break;
                }
            }
        }

        let text = visible_text(element);
        if text.chars().count() > CONTENT_MIN_CHARS {
            parts.push(text);
        }
    }

    parts.join("\n\n")
}

pub fn is_boilerplate(label: &str) -> bool {
    EXCLUDED_SECTIONS.contains(&label)
}

fn parser_output(document: &Html) -> Option<ElementRef<'_>> {
    let content = first_matching(document.root_element(), CONTENT_TEXT)?;
    first_matching(content, PARSER_OUTPUT)
}

/// The label of a level-2 heading. Older markup wraps it in `span.mw-headline`; otherwise the
/// heading's own text is used. The table-of-contents title never counts as a section.
fn heading_label(heading: ElementRef<'_>) -> Option<String> {
    if attr(heading, "id") == Some(TOC_HEADING_ID) || in_table_of_contents(heading) {
        return None;
    }
    let label = match first_matching(heading, "span.mw-headline") {
        Some(span) => visible_text(span),
        None => visible_text(heading),
    };
    (!label.is_empty()).then_some(label)
}

fn in_table_of_contents(element: ElementRef<'_>) -> bool {
    element.ancestors().filter_map(ElementRef::wrap).any(|ancestor| {
        let node = ancestor.value();
        node.id() == Some("toc") || node.classes().any(|class| class == "toc")
    })
}
