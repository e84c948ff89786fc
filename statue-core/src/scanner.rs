//! Content scanning - walks content roots and turns markdown files into entries.

use crate::{
    config::{Config, ContentRoot, ErrorPolicy},
    frontmatter::{parse_frontmatter, FrontmatterError},
    markdown::MarkdownRenderer,
    models::{ContentEntry, EntryMetadata},
    slug::{is_markdown, slug_from_path, title_from_slug},
    template::TemplateExpander,
};
use serde_json::Value;
use serde_yaml::Mapping;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Frontmatter error in {path:?}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },

    #[error("Unsupported frontmatter value in {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to walk content tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Duplicate entry '{id}' ({lang}): {first} and {second}")]
    DuplicateKey {
        id: String,
        lang: String,
        first: String,
        second: String,
    },
}

/// Scans content roots into [`ContentEntry`] records
pub struct ContentScanner {
    roots: Vec<ContentRoot>,
    expander: TemplateExpander,
    renderer: MarkdownRenderer,
    policy: ErrorPolicy,
}

impl ContentScanner {
    pub fn new(roots: Vec<ContentRoot>, expander: TemplateExpander, policy: ErrorPolicy) -> Self {
        Self {
            roots,
            expander,
            renderer: MarkdownRenderer::new(),
            policy,
        }
    }

    /// Scanner over the configured content roots with the site's variable table
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.content_roots(),
            TemplateExpander::from_config(config),
            config.scan.on_error,
        )
    }

    pub fn roots(&self) -> &[ContentRoot] {
        &self.roots
    }

    /// Scan every root, in configuration order
    pub fn scan(&self) -> Result<Vec<ContentEntry>, ScanError> {
        let per_root = self
            .roots
            .iter()
            .map(|root| self.scan_root(root))
            .collect::<Result<Vec<_>, _>>()?;

        let entries: Vec<ContentEntry> = per_root.into_iter().flatten().collect();
        tracing::info!("Scanned {} content entries", entries.len());
        Ok(entries)
    }

    /// Scan one language root; a missing root yields no entries
    pub fn scan_root(&self, root: &ContentRoot) -> Result<Vec<ContentEntry>, ScanError> {
        if !root.path.is_dir() {
            tracing::warn!(
                "Content folder not found for language {}: {:?}",
                root.lang,
                root.path
            );
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut seen: HashMap<String, String> = HashMap::new();

        for item in WalkDir::new(&root.path)
            .follow_links(true)
            .sort_by_file_name()
        {
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    self.handle_failure(ScanError::Walk(e))?;
                    continue;
                }
            };

            if !item.file_type().is_file() || !is_markdown(item.path()) {
                continue;
            }

            let entry = match self.parse_entry(root, item.path()) {
                Ok(entry) => entry,
                Err(e) => {
                    self.handle_failure(e)?;
                    continue;
                }
            };

            let id = entry.index_id();
            if let Some(first) = seen.get(&id) {
                self.handle_failure(ScanError::DuplicateKey {
                    id,
                    lang: root.lang.clone(),
                    first: first.clone(),
                    second: entry.path.clone(),
                })?;
                continue;
            }

            tracing::debug!("Scanned {} -> {}", entry.path, entry.url);
            seen.insert(id, entry.path.clone());
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Apply the error policy: fail-fast returns the error, skip logs and drops it
    fn handle_failure(&self, error: ScanError) -> Result<(), ScanError> {
        match self.policy {
            ErrorPolicy::FailFast => Err(error),
            ErrorPolicy::Skip => {
                tracing::warn!("Skipping document: {}", error);
                Ok(())
            }
        }
    }

    /// Parse and render a single markdown file
    fn parse_entry(&self, root: &ContentRoot, path: &Path) -> Result<ContentEntry, ScanError> {
        let rel = path.strip_prefix(&root.path).unwrap_or(path);
        let slug = slug_from_path(path).unwrap_or_default();
        let directory = rel.parent().map(forward_slashes).unwrap_or_default();

        let source = fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (frontmatter, body) =
            parse_frontmatter(&source).map_err(|source| ScanError::Frontmatter {
                path: path.to_path_buf(),
                source,
            })?;

        let fields = self
            .expand_frontmatter(frontmatter)
            .map_err(|source| ScanError::Metadata {
                path: path.to_path_buf(),
                source,
            })?;
        let metadata = build_metadata(fields, &slug);

        let content = self.renderer.render(&self.expander.expand(&body));

        let main_directory = directory
            .split('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("root")
            .to_string();
        let depth = if directory.is_empty() {
            0
        } else {
            directory.split('/').count()
        };
        let url = if directory.is_empty() {
            format!("/{}", slug)
        } else {
            format!("/{}/{}", directory, slug)
        };

        Ok(ContentEntry {
            slug,
            path: forward_slashes(rel),
            url,
            directory,
            main_directory,
            depth,
            content,
            metadata,
            lang: root.lang.clone(),
            modified: modified_millis(path),
        })
    }

    /// Expand top-level string values and convert the mapping to JSON values
    fn expand_frontmatter(
        &self,
        frontmatter: Mapping,
    ) -> Result<BTreeMap<String, Value>, serde_json::Error> {
        let mut fields = BTreeMap::new();
        for (key, value) in frontmatter {
            let key = match key {
                serde_yaml::Value::String(s) => s,
                other => match yaml_scalar_to_string(&other) {
                    Some(s) => s,
                    None => {
                        tracing::debug!("Ignoring non-scalar frontmatter key {:?}", other);
                        continue;
                    }
                },
            };
            let value = match value {
                serde_yaml::Value::String(s) => Value::String(self.expander.expand(&s)),
                other => serde_json::to_value(other)?,
            };
            fields.insert(key, value);
        }
        Ok(fields)
    }
}

/// Split the well-known fields off the frontmatter, applying fallbacks
fn build_metadata(mut fields: BTreeMap<String, Value>, slug: &str) -> EntryMetadata {
    let mut take = |name: &str| {
        fields
            .remove(name)
            .as_ref()
            .and_then(json_scalar_to_string)
            .filter(|s| !s.is_empty())
    };

    let title = take("title").unwrap_or_else(|| title_from_slug(slug));
    let description = take("description").unwrap_or_default();
    let date = take("date");
    let author = take("author");

    EntryMetadata {
        title,
        description,
        date,
        author,
        extra: fields,
    }
}

fn json_scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn modified_millis(path: &Path) -> Option<u64> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    let since_epoch = modified.duration_since(UNIX_EPOCH).ok()?;
    u64::try_from(since_epoch.as_millis()).ok()
}
