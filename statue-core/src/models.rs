//! Content model structs for scanned documents and the search index.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Artifact format version written into every index document
pub const INDEX_VERSION: &str = "1.0.0";

/// Metadata of a document: the well-known fields plus any other frontmatter keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    /// Remaining frontmatter fields, already template-expanded
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A single markdown document found under a content root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    /// File stem (e.g., "first-post")
    pub slug: String,

    /// Source path relative to the language root, forward slashes
    pub path: String,

    /// Site-relative URL without language prefix
    pub url: String,

    /// Directory relative to the language root ("" at the root)
    pub directory: String,

    /// First directory segment, or "root"
    pub main_directory: String,

    pub depth: usize,

    /// Rendered HTML with the first `<h1>` removed
    pub content: String,

    pub metadata: EntryMetadata,

    pub lang: String,

    /// Source modification time in epoch milliseconds
    #[serde(skip)]
    pub modified: Option<u64>,
}

impl ContentEntry {
    /// Identity key shared by index items and their metadata records
    pub fn index_id(&self) -> String {
        format!("{}-{}", self.main_directory, self.slug)
    }
}

/// One searchable record in the index artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub excerpt: String,
    pub url: String,
    pub category: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Title, description, excerpt and keywords joined for client-side matching
    pub content: String,
}

/// Change-detection record persisted next to each index item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(default)]
    pub mtime: Option<u64>,
    pub hash: String,
}

/// The persisted search artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    pub version: String,
    pub generated: String,
    pub total_items: usize,
    pub items: Vec<IndexEntry>,
    pub metadata: BTreeMap<String, MetadataRecord>,
}

impl IndexDocument {
    pub fn find(&self, id: &str) -> Option<&IndexEntry> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// What survives from a previous run: its items and their metadata records
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PreviousIndex {
    #[serde(default)]
    pub items: Vec<IndexEntry>,
    #[serde(default)]
    pub metadata: BTreeMap<String, MetadataRecord>,
}

impl From<IndexDocument> for PreviousIndex {
    fn from(doc: IndexDocument) -> Self {
        Self {
            items: doc.items,
            metadata: doc.metadata,
        }
    }
}

/// A top-level content directory, as shown in site navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryInfo {
    pub name: String,
    pub path: String,
    pub title: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ContentEntry {
        ContentEntry {
            slug: "first-post".into(),
            path: "blog/2024/first-post.md".into(),
            url: "/blog/2024/first-post".into(),
            directory: "blog/2024".into(),
            main_directory: "blog".into(),
            depth: 2,
            content: "<p>Hi</p>".into(),
            metadata: EntryMetadata {
                title: "First Post".into(),
                description: String::new(),
                date: None,
                author: None,
                extra: BTreeMap::new(),
            },
            lang: "en".into(),
            modified: Some(1),
        }
    }

    #[test]
    fn test_index_id() {
        assert_eq!(entry().index_id(), "blog-first-post");
    }

    #[test]
    fn test_entry_serializes_camel_case_without_mtime() {
        let json = serde_json::to_value(entry()).unwrap();
        assert_eq!(json["mainDirectory"], "blog");
        assert!(json.get("modified").is_none());
        assert_eq!(json["metadata"]["date"], Value::Null);
    }

    #[test]
    fn test_metadata_flattens_extra_fields() {
        let mut meta = entry().metadata;
        meta.extra.insert("tags".into(), serde_json::json!(["a", "b"]));
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["tags"][1], "b");
        assert_eq!(json["title"], "First Post");
    }

    #[test]
    fn test_previous_index_tolerates_missing_fields() {
        let prev: PreviousIndex = serde_json::from_str(r#"{"version": "0.9"}"#).unwrap();
        assert!(prev.items.is_empty());
        assert!(prev.metadata.is_empty());
    }

    #[test]
    fn test_metadata_record_null_mtime() {
        let record: MetadataRecord =
            serde_json::from_str(r#"{"mtime": null, "hash": "abc"}"#).unwrap();
        assert_eq!(record.mtime, None);
    }
}
