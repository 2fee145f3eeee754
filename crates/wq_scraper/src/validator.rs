use url::Url;

pub const WIKIPEDIA_DOMAIN: &str = "wikipedia.org";
pub const ARTICLE_PATH_MARKER: &str = "/wiki/";

/// Namespaces that are never regular articles.
pub const EXCLUDED_NAMESPACES: &[&str] = &[
    "Special:",
    "File:",
    "Category:",
    "Template:",
    "Talk:",
    "User:",
    "Wikipedia:",
    "Help:",
    "Portal:",
];

/// Returns true if `url` points at a regular Wikipedia article.
pub fn validate_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return false;
    };

    let Some(host) = parsed.host_str() else {
        return false;
    };
    if !host.ends_with(WIKIPEDIA_DOMAIN) {
        return false;
    }

    let path = parsed.path();
    if !path.contains(ARTICLE_PATH_MARKER) {
        return false;
    }

    let article_name = path.rsplit(ARTICLE_PATH_MARKER).next().unwrap_or_default();
    !EXCLUDED_NAMESPACES
        .iter()
        .any(|prefix| article_name.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_articles() {
        assert!(validate_url("https://en.wikipedia.org/wiki/Alan_Turing"));
        assert!(validate_url("https://de.wikipedia.org/wiki/Rust_(Programmiersprache)"));
        assert!(validate_url("  https://en.m.wikipedia.org/wiki/Python  "));
    }

    #[test]
    fn test_rejects_other_hosts() {
        assert!(!validate_url("https://en.wikipedia.com/wiki/Alan_Turing"));
        assert!(!validate_url("https://example.org/wiki/Alan_Turing"));
    }

    #[test]
    fn test_rejects_non_article_paths() {
        assert!(!validate_url("https://en.wikipedia.org/w/index.php?title=Alan_Turing"));
        assert!(!validate_url("https://en.wikipedia.org/"));
    }

    #[test]
    fn test_rejects_namespaces() {
        for name in [
            "Special:Random",
            "File:Turing.jpg",
            "Category:Mathematicians",
            "Template:Infobox",
            "Talk:Alan_Turing",
            "User:Example",
            "Wikipedia:About",
            "Help:Contents",
            "Portal:Science",
        ] {
            let url = format!("https://en.wikipedia.org/wiki/{name}");
            assert!(!validate_url(&url), "{url} should be rejected");
        }
    }

    #[test]
    fn test_garbage_is_rejected_without_panicking() {
        assert!(!validate_url(""));
        assert!(!validate_url("not a url"));
        assert!(!validate_url("wikipedia.org/wiki/Alan_Turing"));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let url = "https://en.wikipedia.org/wiki/Category:Physics";
        assert_eq!(validate_url(url), validate_url(url));
    }
}
