//! Markdown rendering.

use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Markdown renderer producing page body HTML
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        Self { options }
    }

    /// Convert markdown to HTML, dropping the first level-one heading
    ///
    /// Pages show their title separately, so the leading `# Title` would otherwise
    /// appear twice.
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let events = strip_first_h1(parser.collect());

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove the events of the first `<h1>` (opening tag through closing tag)
fn strip_first_h1(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut state = H1State::Searching;

    for event in events {
        match state {
            H1State::Searching => {
                if matches!(
                    event,
                    Event::Start(Tag::Heading {
                        level: HeadingLevel::H1,
                        ..
                    })
                ) {
                    state = H1State::Inside;
                } else {
                    out.push(event);
                }
            }
            H1State::Inside => {
                if matches!(event, Event::End(TagEnd::Heading(HeadingLevel::H1))) {
                    state = H1State::Done;
                }
            }
            H1State::Done => out.push(event),
        }
    }

    out
}

#[derive(Clone, Copy)]
enum H1State {
    Searching,
    Inside,
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_h1_removed() {
        let html = MarkdownRenderer::new().render("# Test\nHello **world**.");
        assert!(!html.contains("<h1"));
        assert!(html.contains("<p>Hello <strong>world</strong>.</p>"));
    }

    #[test]
    fn test_only_first_h1_removed() {
        let html = MarkdownRenderer::new().render("# One\n\ntext\n\n# Two\n");
        assert!(!html.contains("One"));
        assert!(html.contains("<h1>Two</h1>"));
    }

    #[test]
    fn test_other_headings_kept() {
        let html = MarkdownRenderer::new().render("## Section\n\nBody");
        assert!(html.contains("<h2>Section</h2>"));
    }

    #[test]
    fn test_h1_with_braces_removed() {
        let html = MarkdownRenderer::new().render("# Title {#intro}\n\nBody");
        assert!(!html.contains("intro"));
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn test_trailing_braces_in_heading_are_text() {
        let html = MarkdownRenderer::new().render("## Passing {options}\n");
        assert!(html.contains("<h2>Passing {options}</h2>"));
    }

    #[test]
    fn test_tables_enabled() {
        let html = MarkdownRenderer::new().render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
