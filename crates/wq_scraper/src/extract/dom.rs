//! Read-only lookups over a parsed document.
//!
//! Every helper takes an [`ElementRef`] scope and hands back references into the same tree, so
//! extraction never mutates the markup it inspects. An unparsable selector behaves like a
//! selector that matches nothing.

use scraper::{ElementRef, Selector};

pub fn first_matching<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    let found = scope.select(&selector).next();
    found
}

pub fn all_matching<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };
    let found: Vec<_> = scope.select(&selector).collect();
    found
}

/// Text content with runs of whitespace collapsed to single spaces and the ends trimmed.
pub fn visible_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}
