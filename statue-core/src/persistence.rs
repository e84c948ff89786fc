//! Loading and writing the search index artifact.

use crate::models::{IndexDocument, IndexEntry, MetadataRecord, PreviousIndex};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to write search index {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize search index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Artifact as read from disk, before each item is checked on its own
#[derive(Deserialize)]
struct StoredIndex {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    metadata: BTreeMap<String, Value>,
}

impl From<StoredIndex> for PreviousIndex {
    fn from(stored: StoredIndex) -> Self {
        let items = stored
            .items
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<IndexEntry>(raw) {
                Ok(item) => Some(item),
                Err(err) => {
                    tracing::warn!("Ignoring unreadable item in existing search index: {}", err);
                    None
                }
            })
            .collect();

        let metadata = stored
            .metadata
            .into_iter()
            .filter_map(|(id, raw)| match serde_json::from_value::<MetadataRecord>(raw) {
                Ok(record) => Some((id, record)),
                Err(err) => {
                    tracing::warn!("Ignoring unreadable metadata for {}: {}", id, err);
                    None
                }
            })
            .collect();

        Self { items, metadata }
    }
}

/// Load the previous artifact; a missing or unreadable file yields an empty baseline
///
/// Items or records that no longer fit the current schema are dropped one by one,
/// so only those entries are rebuilt.
pub fn load_previous_index(path: &Path) -> PreviousIndex {
    if !path.exists() {
        tracing::debug!("No existing search index at {:?}", path);
        return PreviousIndex::default();
    }

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!("Failed to read search index {:?}: {}", path, err);
            return PreviousIndex::default();
        }
    };

    match serde_json::from_slice::<StoredIndex>(&data) {
        Ok(stored) => PreviousIndex::from(stored),
        Err(err) => {
            tracing::warn!(
                "Failed to load existing search index, rebuilding from scratch: {}",
                err
            );
            PreviousIndex::default()
        }
    }
}

/// Replace the artifact at `path` with `document`
///
/// The JSON is written to a sibling temporary file first and renamed over the
/// target, so readers never observe a half-written index.
pub fn write_index(path: &Path, document: &IndexDocument) -> Result<(), IndexError> {
    let write_err = |source| IndexError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let json = serde_json::to_vec_pretty(document)?;
    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(write_err)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(err));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IndexEntry, MetadataRecord, INDEX_VERSION};
    use std::collections::BTreeMap;

    fn document() -> IndexDocument {
        let item = IndexEntry {
            id: "blog-a".into(),
            title: "A".into(),
            description: String::new(),
            excerpt: "alpha".into(),
            url: "/blog/a".into(),
            category: "blog".into(),
            date: Some("2024-01-15".into()),
            author: None,
            keywords: vec!["alpha".into()],
            content: "A  alpha alpha".into(),
        };
        IndexDocument {
            version: INDEX_VERSION.into(),
            generated: "2024-01-15T00:00:00.000Z".into(),
            total_items: 1,
            items: vec![item],
            metadata: BTreeMap::from([(
                "blog-a".to_string(),
                MetadataRecord {
                    mtime: None,
                    hash: "abc".into(),
                },
            )]),
        }
    }

    #[test]
    fn test_missing_file_is_empty_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let prev = load_previous_index(&dir.path().join("search-index.json"));
        assert_eq!(prev, PreviousIndex::default());
    }

    #[test]
    fn test_corrupt_file_is_empty_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search-index.json");
        fs::write(&path, "{\"items\": [").unwrap();
        assert_eq!(load_previous_index(&path), PreviousIndex::default());
    }

    #[test]
    fn test_unreadable_item_drops_only_that_item() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search-index.json");
        let mut raw = serde_json::to_value(document()).unwrap();
        let mut legacy = raw["items"][0].clone();
        legacy["id"] = "blog-legacy".into();
        legacy["date"] = 1_705_276_800_000u64.into();
        raw["items"].as_array_mut().unwrap().push(legacy);
        raw["metadata"]["blog-legacy"] = serde_json::json!({"mtime": 1, "hash": "def"});
        fs::write(&path, raw.to_string()).unwrap();

        let prev = load_previous_index(&path);
        let ids: Vec<_> = prev.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["blog-a"]);
        // the orphaned record is kept and its item rebuilt by the index builder
        assert_eq!(prev.metadata.len(), 2);
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("static").join("search-index.json");
        write_index(&path, &document()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], "1.0.0");
        assert_eq!(raw["totalItems"], 1);
        assert_eq!(raw["metadata"]["blog-a"]["mtime"], serde_json::Value::Null);
        assert!(!dir.path().join("static").join("search-index.json.tmp").exists());

        let prev = load_previous_index(&path);
        assert_eq!(prev, PreviousIndex::from(document()));
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search-index.json");
        fs::write(&path, "x".repeat(10_000)).unwrap();

        let mut doc = document();
        doc.items.clear();
        doc.metadata.clear();
        doc.total_items = 0;
        write_index(&path, &doc).unwrap();

        let prev = load_previous_index(&path);
        assert!(prev.items.is_empty());
    }
}
