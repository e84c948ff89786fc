//! Slug helpers: deriving slugs from file names and display titles from slugs.

use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Turn a slug into a display title
///
/// Rules:
/// - Split on hyphens
/// - Uppercase the first grapheme of every word, keep the rest as written
/// - Join with single spaces
///
/// # Examples
///
/// ```
/// use statue_core::title_from_slug;
///
/// assert_eq!(title_from_slug("getting-started"), "Getting Started");
/// assert_eq!(title_from_slug("faq"), "Faq");
/// assert_eq!(title_from_slug("rust-API-guide"), "Rust API Guide");
/// ```
pub fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut graphemes = word.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut out = first.to_uppercase();
            out.push_str(graphemes.as_str());
            out
        }
        None => String::new(),
    }
}

/// Slug for a markdown source: the file name with its `.md` extension removed
pub fn slug_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    Some(name.strip_suffix(".md").unwrap_or(name).to_string())
}

/// Whether a path names a markdown source
pub fn is_markdown(path: &Path) -> bool {
    path.extension().map(|ext| ext == "md").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_basic_titles() {
        assert_eq!(title_from_slug("hello-world"), "Hello World");
        assert_eq!(title_from_slug("privacy-policy"), "Privacy Policy");
    }

    #[test]
    fn test_unicode() {
        assert_eq!(title_from_slug("école-été"), "École Été");
        assert_eq!(title_from_slug("naïve"), "Naïve");
    }

    #[test]
    fn test_empty_segments() {
        assert_eq!(title_from_slug(""), "");
        assert_eq!(title_from_slug("double--dash"), "Double  Dash");
    }

    #[test]
    fn test_underscores_are_kept() {
        assert_eq!(title_from_slug("snake_case"), "Snake_case");
    }

    #[test]
    fn test_slug_from_path() {
        assert_eq!(
            slug_from_path(&PathBuf::from("blog/first-post.md")),
            Some("first-post".to_string())
        );
        assert_eq!(
            slug_from_path(&PathBuf::from("notes.v2.md")),
            Some("notes.v2".to_string())
        );
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(&PathBuf::from("a/b.md")));
        assert!(!is_markdown(&PathBuf::from("a/b.markdown")));
        assert!(!is_markdown(&PathBuf::from("a/image.png")));
        assert!(!is_markdown(&PathBuf::from("README")));
    }
}
