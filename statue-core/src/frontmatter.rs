//! Frontmatter parsing from markdown files.

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)^---[ \t]*\r?\n(?:(.*?)\r?\n)??---[ \t]*(?:\r?\n(.*))?$").unwrap()
    })
}

/// Parse frontmatter from markdown content
///
/// Returns a tuple of (frontmatter mapping, markdown_body).
/// If no frontmatter is present, returns an empty mapping with the full content as body.
///
/// # Example
///
/// ```
/// use statue_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: My Post\ndate: 2025-01-01\n---\n# Hello World\n";
///
/// let (fm, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(fm.get("title").and_then(|v| v.as_str()), Some("My Post"));
/// assert!(body.trim().starts_with("# Hello World"));
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(Mapping, String), FrontmatterError> {
    let re = frontmatter_regex();

    let Some(captures) = re.captures(content) else {
        return Ok((Mapping::new(), content.to_string()));
    };

    let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let body = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

    let frontmatter = match serde_yaml::from_str::<Value>(yaml)? {
        Value::Null => Mapping::new(),
        Value::Mapping(map) => map,
        Value::Bool(_) => return Err(FrontmatterError::NotAMapping("a boolean")),
        Value::Number(_) => return Err(FrontmatterError::NotAMapping("a number")),
        Value::String(_) => return Err(FrontmatterError::NotAMapping("a string")),
        Value::Sequence(_) => return Err(FrontmatterError::NotAMapping("a sequence")),
        Value::Tagged(_) => return Err(FrontmatterError::NotAMapping("a tagged value")),
    };

    Ok((frontmatter, body.to_string()))
}
