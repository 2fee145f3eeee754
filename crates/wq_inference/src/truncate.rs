pub const DEFAULT_MAX_CHARS: usize = 10_000;
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated for length...]";

const PARAGRAPH_BREAK: &str = "\n\n";
// A paragraph break is only worth cutting at if it keeps more than this share of the budget.
const MIN_KEEP_RATIO: f64 = 0.7;

/// Bounds `text` to `max_chars` characters plus the marker, preferring to cut at a paragraph break.
pub fn truncate_content(text: &str, max_chars: usize) -> String {
    let Some((hard_cut, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };

    let head = &text[..hard_cut];
    let cut = head
        .rfind(PARAGRAPH_BREAK)
        .filter(|&pos| head[..pos].chars().count() as f64 > max_chars as f64 * MIN_KEEP_RATIO)
        .unwrap_or(hard_cut);

    let mut truncated = String::with_capacity(cut + TRUNCATION_MARKER.len());
    truncated.push_str(&text[..cut]);
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_chars() -> usize {
        TRUNCATION_MARKER.chars().count()
    }

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(truncate_content("hello", 10), "hello");
        let exact = "a".repeat(100);
        assert_eq!(truncate_content(&exact, 100), exact);
        assert_eq!(truncate_content("", 0), "");
    }

    #[test]
    fn test_cuts_at_late_paragraph_break() {
        let text = format!("{}\n\n{}", "a".repeat(80), "b".repeat(50));
        let truncated = truncate_content(&text, 100);
        assert_eq!(truncated, format!("{}{}", "a".repeat(80), TRUNCATION_MARKER));
    }

    #[test]
    fn test_early_paragraph_break_falls_back_to_hard_cut() {
        let text = format!("{}\n\n{}", "a".repeat(20), "b".repeat(200));
        let truncated = truncate_content(&text, 100);
        let expected_head: String = text.chars().take(100).collect();
        assert_eq!(truncated, format!("{expected_head}{TRUNCATION_MARKER}"));
    }

    #[test]
    fn test_output_is_bounded() {
        for len in [101, 150, 10_001, 25_000] {
            let text: String = (0..len)
                .map(|i| if i % 37 == 0 { '\n' } else { 'x' })
                .collect();
            let truncated = truncate_content(&text, 100);
            assert!(truncated.chars().count() <= 100 + marker_chars());
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "é".repeat(150);
        let truncated = truncate_content(&text, 100);
        assert_eq!(truncated.chars().count(), 100 + marker_chars());
        assert!(truncated.starts_with(&"é".repeat(100)));
    }
}
