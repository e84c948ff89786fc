//! Plain-text extraction and bounded excerpts for search entries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Excerpt length used when the configuration does not override it
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

/// Appended to every truncated excerpt
pub const ELLIPSIS: &str = "...";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[^;]+;").unwrap());

/// Strip tags and entities from HTML and collapse whitespace
pub fn html_to_text(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, "");
    let without_entities = ENTITY_RE.replace_all(&without_tags, "");
    without_entities
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build a plain-text excerpt of at most `max_chars` characters (plus the ellipsis)
///
/// Text that fits is returned unchanged. Longer text is cut at `max_chars`, then
/// backed up to the last space inside the cut so no word is split. Without any
/// space the cut is hard.
///
/// ```
/// use statue_core::excerpt::create_excerpt;
///
/// let html = "<p>The quick brown fox jumps over the lazy dog</p>";
/// assert_eq!(create_excerpt(html, 18), "The quick brown...");
/// assert_eq!(create_excerpt(html, 200), "The quick brown fox jumps over the lazy dog");
/// ```
pub fn create_excerpt(html: &str, max_chars: usize) -> String {
    let text = html_to_text(html);
    truncate_on_word(&text, max_chars)
}

fn truncate_on_word(text: &str, max_chars: usize) -> String {
    let cut = match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => byte_idx,
        None => return text.to_string(),
    };

    let truncated = &text[..cut];
    match truncated.rfind(' ') {
        Some(last_space) if last_space > 0 => format!("{}{}", &truncated[..last_space], ELLIPSIS),
        _ => format!("{}{}", truncated, ELLIPSIS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text() {
        let html = "<p>Hello <strong>world</strong>!</p>\n<p>Second&nbsp;paragraph.</p>";
        let text = html_to_text(html);
        assert_eq!(text, "Hello world! Secondparagraph.");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(html_to_text("  a \n\n\t b  "), "a b");
    }

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(create_excerpt("<p>short</p>", 200), "short");
        assert_eq!(create_excerpt("exactly ten", 11), "exactly ten");
    }

    #[test]
    fn test_create_excerpt_word_boundary() {
        let text = "This is a long piece of text that should be truncated at a word boundary";
        let excerpt = create_excerpt(text, 30);
        assert_eq!(excerpt, "This is a long piece of text...");
        let body = excerpt.strip_suffix(ELLIPSIS).unwrap();
        assert!(body.chars().count() <= 30);
        assert!(text.starts_with(&format!("{} ", body)));
    }

    #[test]
    fn test_hard_cut_without_spaces() {
        let excerpt = create_excerpt("abcdefghijklmnopqrstuvwxyz", 10);
        assert_eq!(excerpt, "abcdefghij...");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "ééééé ééééé ééééé";
        let excerpt = create_excerpt(text, 8);
        assert_eq!(excerpt, "ééééé...");
    }

    #[test]
    fn test_bound_holds_across_lengths() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod";
        for max in 5..text.len() {
            let excerpt = create_excerpt(text, max);
            let body = excerpt.strip_suffix(ELLIPSIS).unwrap();
            assert!(body.chars().count() <= max, "max {max}: {excerpt}");
            assert!(
                text.starts_with(&format!("{} ", body)),
                "max {max} split a word: {excerpt}"
            );
        }
    }
}
