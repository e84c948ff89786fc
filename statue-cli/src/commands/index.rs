//! Index command implementation.

use anyhow::{Context, Result};
use statue_core::{Config, ContentCache, IndexOptions, SearchIndexPipeline};
use std::path::{Path, PathBuf};

/// Generate the search index and log what changed
pub fn generate_index(config_path: &Path, force: bool, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    tracing::info!("Generating search index for {}", config.site.name);

    let pipeline = SearchIndexPipeline::new(&config);
    let mut cache = ContentCache::new();
    let options = IndexOptions { force, output };
    let outcome = pipeline
        .run(&mut cache, &options)
        .context("Failed to generate search index")?;

    let stats = &outcome.stats;
    tracing::info!("Total items: {}", outcome.document.total_items);
    tracing::info!("New items: {}", stats.new_items);
    tracing::info!("Updated items: {}", stats.updated_items);
    tracing::info!("Unchanged items: {}", stats.unchanged_items);
    if !stats.removed.is_empty() {
        tracing::info!("Removed items: {}", stats.removed.len());
        for title in &stats.removed {
            tracing::info!("  - {}", title);
        }
    }
    tracing::info!("Categories: {}", stats.categories.join(", "));
    tracing::info!(
        "Processed {}/{} items ({}% skipped)",
        stats.processed(),
        stats.searchable,
        stats.percent_skipped()
    );

    Ok(())
}
