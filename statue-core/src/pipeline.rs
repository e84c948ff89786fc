//! The search index build: scan, diff against the previous artifact, write.

use crate::{
    cache::ContentCache,
    config::Config,
    index::{IndexBuilder, IndexOutcome},
    persistence::{load_previous_index, write_index, IndexError},
    scanner::{ContentScanner, ScanError},
};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Options for a single indexing run
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Ignore the previous artifact's records and rebuild every entry
    pub force: bool,
    /// Write somewhere other than the configured index path
    pub output: Option<PathBuf>,
}

/// Drives one indexing run against a configuration
pub struct SearchIndexPipeline<'a> {
    config: &'a Config,
    scanner: ContentScanner,
}

impl<'a> SearchIndexPipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            scanner: ContentScanner::from_config(config),
        }
    }

    pub fn scanner(&self) -> &ContentScanner {
        &self.scanner
    }

    pub fn index_builder(&self, force: bool) -> IndexBuilder {
        IndexBuilder::new(self.config.search.categories.iter().cloned())
            .language(self.config.search_language())
            .excerpt_length(self.config.search.excerpt_length)
            .force(force)
    }

    /// Scan (through `cache`), merge with the previous artifact and write the result
    pub fn run(
        &self,
        cache: &mut ContentCache,
        options: &IndexOptions,
    ) -> Result<IndexOutcome, PipelineError> {
        let index_path = options
            .output
            .clone()
            .unwrap_or_else(|| self.config.index_path());

        let previous = load_previous_index(&index_path);
        tracing::info!("Loaded existing index with {} items", previous.items.len());

        let entries = cache.get_or_scan(&self.scanner)?;
        let outcome = self.index_builder(options.force).build(entries, &previous);

        write_index(&index_path, &outcome.document)?;
        tracing::info!("Search index generated: {:?}", index_path);

        Ok(outcome)
    }
}
