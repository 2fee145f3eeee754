use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html};
use wq_core::KeyEntities;

use super::dom::{all_matching, attr, first_matching, visible_text};
use super::PARSER_OUTPUT;

const INFOBOX: &str = r#"table[class*="infobox"]"#;
const INFOBOX_LINK_LIMIT: usize = 50;
const CONTENT_LINK_LIMIT: usize = 100;
const MIN_ENTITY_CHARS: usize = 3;

const INFOBOX_ORGANIZATION_KEYWORDS: &[&str] =
    &["university", "institute", "company", "organization", "corporation"];
const INFOBOX_LOCATION_KEYWORDS: &[&str] = &["country", "city", "state", "kingdom", "republic"];

// Body links are far noisier than the infobox, so only match title suffixes and well-known names.
const CONTENT_ORGANIZATION_KEYWORDS: &[&str] =
    &["_university", "_college", "_institute", "_company", "_corporation"];
const CONTENT_LOCATION_KEYWORDS: &[&str] =
    &["_country", "_city", "_state", "united_kingdom", "united_states"];

lazy_static! {
    static ref BARE_NUMBER: Regex = Regex::new(r"^\d+$").expect("BARE_NUMBER is a valid regex");
    static ref DATE_LIKE: Regex = Regex::new(r"^\w+\s+\d+").expect("DATE_LIKE is a valid regex");
}

enum EntityKind {
    Organization,
    Location,
}

/// Best-effort organisation and location detection from link targets.
///
/// `people` is left empty: none of the link conventions we rely on identify a person reliably.
pub fn extract_entities(document: &Html) -> KeyEntities {
    let mut entities = KeyEntities::default();
    let root = document.root_element();

    if let Some(infobox) = first_matching(root, INFOBOX) {
        scan_links(
            infobox,
            INFOBOX_LINK_LIMIT,
            &mut entities,
            |href, _text| classify(href, INFOBOX_ORGANIZATION_KEYWORDS, INFOBOX_LOCATION_KEYWORDS),
        );
    }

    if let Some(body) = first_matching(root, PARSER_OUTPUT) {
        scan_links(body, CONTENT_LINK_LIMIT, &mut entities, |href, text| {
            if !href.starts_with("/wiki/") || looks_like_date(text) {
                return None;
            }
            classify(href, CONTENT_ORGANIZATION_KEYWORDS, CONTENT_LOCATION_KEYWORDS)
        });
    }

    entities
}

fn scan_links<F>(scope: ElementRef<'_>, limit: usize, entities: &mut KeyEntities, classifier: F)
where
    F: Fn(&str, &str) -> Option<EntityKind>,
{
    for link in all_matching(scope, "a").into_iter().take(limit) {
        let Some(href) = attr(link, "href") else {
            continue;
        };
        let text = visible_text(link);
        if text.chars().count() < MIN_ENTITY_CHARS {
            continue;
        }
        match classifier(href, &text) {
            Some(EntityKind::Organization) => {
                entities.add_organization(&text);
            }
            Some(EntityKind::Location) => {
                entities.add_location(&text);
            }
            None => {}
        }
    }
}

fn classify(href: &str, organizations: &[&str], locations: &[&str]) -> Option<EntityKind> {
    let href = href.to_lowercase();
    if organizations.iter().any(|kw| href.contains(kw)) {
        Some(EntityKind::Organization)
    } else if locations.iter().any(|kw| href.contains(kw)) {
        Some(EntityKind::Location)
    } else {
        None
    }
}

fn looks_like_date(text: &str) -> bool {
    BARE_NUMBER.is_match(text) || DATE_LIKE.is_match(text)
}
