//! Incremental search index construction.
//!
//! Each run compares the scanned entries against the previous artifact. Entries
//! whose source is unchanged are copied over as they were; new or stale entries get
//! a fresh excerpt, keyword list and metadata record. Ids that no longer appear in
//! the scan are dropped from both the items and the metadata map.

use crate::{
    excerpt::{create_excerpt, DEFAULT_EXCERPT_LENGTH},
    keywords::extract_keywords,
    models::{
        ContentEntry, IndexDocument, IndexEntry, MetadataRecord, PreviousIndex, INDEX_VERSION,
    },
};
use chrono::{SecondsFormat, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Why an entry is (or is not) rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// No usable prior record
    New,
    /// Prior record exists but the source changed
    Changed,
    /// Prior item and record can be reused
    Unchanged,
}

/// Content hash used for change detection: blake3 over the body HTML and the
/// serialized metadata.
pub fn content_hash(entry: &ContentEntry) -> String {
    // EntryMetadata holds strings and a string-keyed map of JSON values, which
    // always serialize
    let metadata = serde_json::to_string(&entry.metadata).unwrap_or_default();
    let mut hasher = blake3::Hasher::new();
    hasher.update(entry.content.as_bytes());
    hasher.update(metadata.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Decide whether an entry must be recomputed
///
/// A differing modification time forces a rebuild on its own. When either time is
/// unknown, or both are equal, the content hash decides.
pub fn staleness(entry: &ContentEntry, prior: Option<&MetadataRecord>) -> Staleness {
    let Some(prior) = prior else {
        return Staleness::New;
    };

    if let (Some(current), Some(stored)) = (entry.modified, prior.mtime) {
        if current != stored {
            return Staleness::Changed;
        }
    }

    if content_hash(entry) != prior.hash {
        Staleness::Changed
    } else {
        Staleness::Unchanged
    }
}

/// Counts and details reported after a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub searchable: usize,
    pub new_items: usize,
    pub updated_items: usize,
    pub unchanged_items: usize,
    /// Titles of items dropped because their source disappeared
    pub removed: Vec<String>,
    /// Distinct categories in the final index, first-seen order
    pub categories: Vec<String>,
}

impl IndexStats {
    pub fn processed(&self) -> usize {
        self.new_items + self.updated_items
    }

    /// Share of searchable entries reused from the previous run, in percent
    pub fn percent_skipped(&self) -> usize {
        if self.searchable == 0 {
            0
        } else {
            (self.unchanged_items * 100 + self.searchable / 2) / self.searchable
        }
    }
}

/// Result of one indexing pass
#[derive(Debug, Clone)]
pub struct IndexOutcome {
    pub document: IndexDocument,
    pub stats: IndexStats,
}

/// Builds the next index document from scanned entries and the previous one
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    categories: Vec<String>,
    language: Option<String>,
    excerpt_length: usize,
    force: bool,
}

impl IndexBuilder {
    /// Builder indexing documents whose top-level directory is in `categories`
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            language: None,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            force: false,
        }
    }

    /// Only index entries in this language
    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    pub fn excerpt_length(mut self, max_chars: usize) -> Self {
        self.excerpt_length = max_chars;
        self
    }

    /// Rebuild every entry regardless of prior records
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    fn is_searchable(&self, entry: &ContentEntry) -> bool {
        self.categories.iter().any(|c| *c == entry.main_directory)
            && self.language.as_deref().map_or(true, |l| entry.lang == l)
    }

    /// Merge `entries` with `previous` into a new document
    pub fn build(&self, entries: &[ContentEntry], previous: &PreviousIndex) -> IndexOutcome {
        let searchable: Vec<&ContentEntry> =
            entries.iter().filter(|e| self.is_searchable(e)).collect();
        tracing::info!("Found {} searchable items", searchable.len());

        let prior_items: HashMap<&str, &IndexEntry> = previous
            .items
            .iter()
            .map(|item| (item.id.as_str(), item))
            .collect();

        let mut stats = IndexStats {
            searchable: searchable.len(),
            ..IndexStats::default()
        };
        let mut items = Vec::with_capacity(searchable.len());
        let mut metadata = BTreeMap::new();

        for entry in &searchable {
            let id = entry.index_id();
            let prior_item = prior_items.get(id.as_str()).copied();
            let prior_record = previous.metadata.get(&id);

            let state = if self.force {
                Staleness::Changed
            } else {
                match (staleness(entry, prior_record), prior_item) {
                    // a record without its item cannot be reused
                    (Staleness::Unchanged, None) => Staleness::Changed,
                    (state, _) => state,
                }
            };

            match (state, prior_item, prior_record) {
                (Staleness::Unchanged, Some(item), Some(record)) => {
                    items.push(item.clone());
                    metadata.insert(id, record.clone());
                    stats.unchanged_items += 1;
                }
                _ => {
                    let (item, record) = self.index_entry(entry, id.clone());
                    if prior_item.is_some() {
                        tracing::info!("Updated: {}", item.title);
                        stats.updated_items += 1;
                    } else {
                        tracing::info!("New: {}", item.title);
                        stats.new_items += 1;
                    }
                    items.push(item);
                    metadata.insert(id, record);
                }
            }
        }

        let current: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
        stats.removed = previous
            .items
            .iter()
            .filter(|item| !current.contains(item.id.as_str()))
            .map(|item| item.title.clone())
            .collect();

        for item in &items {
            if !stats.categories.contains(&item.category) {
                stats.categories.push(item.category.clone());
            }
        }

        let document = IndexDocument {
            version: INDEX_VERSION.to_string(),
            generated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            total_items: items.len(),
            items,
            metadata,
        };

        IndexOutcome { document, stats }
    }

    /// Compute a fresh item and metadata record for one entry
    fn index_entry(&self, entry: &ContentEntry, id: String) -> (IndexEntry, MetadataRecord) {
        let meta = &entry.metadata;
        let excerpt = create_excerpt(&entry.content, self.excerpt_length);
        let keywords = extract_keywords(&meta.title, &meta.description, &entry.content);
        let content = format!(
            "{} {} {} {}",
            meta.title,
            meta.description,
            excerpt,
            keywords.join(" ")
        );

        let item = IndexEntry {
            id,
            title: meta.title.clone(),
            description: meta.description.clone(),
            excerpt,
            url: entry.url.clone(),
            category: entry.main_directory.clone(),
            date: meta.date.clone(),
            author: meta.author.clone(),
            keywords,
            content,
        };
        let record = MetadataRecord {
            mtime: entry.modified,
            hash: content_hash(entry),
        };
        (item, record)
    }
}
