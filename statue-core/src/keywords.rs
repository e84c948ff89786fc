//! Frequency-ranked keyword extraction for search entries.

use crate::excerpt::html_to_text;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Maximum number of keywords kept per entry
pub const MAX_KEYWORDS: usize = 10;

const MIN_TOKEN_CHARS: usize = 3;
const MAX_TOKEN_CHARS: usize = 19;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "but", "for", "are", "you", "all", "can", "had", "her", "was", "one", "our",
        "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see", "two",
        "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use", "with",
        "have", "this", "will", "your", "from", "they", "know", "want", "been", "good", "much",
        "some", "time", "very", "when", "come", "here", "just", "like", "long", "make", "many",
        "over", "such", "take", "than", "them", "well", "were",
    ]
    .into_iter()
    .collect()
});

fn is_delimiter(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            ',' | '.' | '!' | '?' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '\'' | '-'
        )
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

fn keep_token(token: &str) -> bool {
    let len = token.chars().count();
    (MIN_TOKEN_CHARS..=MAX_TOKEN_CHARS).contains(&len)
        && !token.chars().all(|c| c.is_ascii_digit())
        && !is_stop_word(token)
}

/// Extract up to ten keywords from a document's title, description and HTML body
///
/// Tokens are ranked by descending frequency; ties keep the order in which the
/// tokens first appeared.
pub fn extract_keywords(title: &str, description: &str, content_html: &str) -> Vec<String> {
    let text = format!("{} {} {}", title, description, html_to_text(content_html)).to_lowercase();

    // (token, count) in first-appearance order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for token in text.split(is_delimiter).filter(|t| keep_token(t)) {
        match positions.get(token) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // Stable sort keeps first-appearance order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(token, _)| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_by_frequency() {
        let keywords = extract_keywords(
            "Rust ownership",
            "Borrowing rules",
            "<p>ownership and borrowing; ownership again</p>",
        );
        assert_eq!(keywords[0], "ownership");
        assert_eq!(keywords[1], "borrowing");
        assert_eq!(keywords[2], "rust");
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let keywords = extract_keywords("", "", "zebra apple mango apple zebra mango");
        assert_eq!(keywords, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_filters_short_long_numeric_and_stop_words() {
        let keywords = extract_keywords(
            "The big idea",
            "",
            "<p>an 2024 42nd supercalifragilisticexpialidocious nineteencharacters with</p>",
        );
        assert_eq!(keywords, vec!["big", "idea", "42nd", "nineteencharacters"]);
    }

    #[test]
    fn test_splits_on_punctuation() {
        let keywords = extract_keywords("", "", "well-known (rust) [crate]: \"serde\"'s");
        assert_eq!(keywords, vec!["known", "rust", "crate", "serde"]);
    }

    #[test]
    fn test_markup_is_not_tokenized() {
        let keywords = extract_keywords("Test", "", "<p>Hello <strong>world</strong>.</p>");
        assert_eq!(keywords, vec!["test", "hello", "world"]);
    }

    #[test]
    fn test_keyword_bound() {
        let body: String = (0..40)
            .map(|i| format!("token{} ", "abcdefghijklmnopqrstuvwxyz".chars().nth(i % 26).unwrap()))
            .collect();
        let keywords = extract_keywords("", "", &body);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        // tokena..tokenn appear twice, so they lead
        assert_eq!(keywords[0], "tokena");
        assert!(keywords.iter().all(|k| !is_stop_word(k)));

        let frequency = |word: &str| body.split_whitespace().filter(|t| *t == word).count();
        let counts: Vec<usize> = keywords.iter().map(|k| frequency(k)).collect();
        assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
        assert!(counts.iter().all(|&c| c == 2));
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_keywords("", "", "").is_empty());
    }
}
