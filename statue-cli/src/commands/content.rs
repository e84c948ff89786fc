//! Content lookups: prerender paths, single documents and directory listings.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use statue_core::{catalog, Config, ContentCache, ContentEntry, ContentScanner, DirectoryInfo};
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryListing<'a> {
    directory: &'a str,
    entries: Vec<&'a ContentEntry>,
    sub_directories: Vec<DirectoryInfo>,
}

fn load(config_path: &Path) -> Result<(Config, Vec<ContentEntry>)> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let scanner = ContentScanner::from_config(&config);
    let mut cache = ContentCache::new();
    let entries = cache
        .get_or_scan(&scanner)
        .context("Failed to scan content")?
        .to_vec();
    Ok((config, entries))
}

/// Language filter applies only when the site is multilingual
fn language_filter<'a>(config: &Config, lang: Option<&'a str>) -> Option<&'a str> {
    if config.i18n_enabled() {
        lang
    } else {
        None
    }
}

/// Print every path a static export should render, one per line
pub fn list_paths(config_path: &Path) -> Result<()> {
    let (_, entries) = load(config_path)?;
    for path in catalog::prerender_paths(&entries) {
        println!("{}", path);
    }
    Ok(())
}

/// Print the document served at `url` as JSON
pub fn show_entry(config_path: &Path, url: &str, lang: Option<&str>) -> Result<()> {
    let (config, entries) = load(config_path)?;
    let lang = language_filter(&config, lang);

    let Some(entry) = catalog::find_by_url(&entries, url, lang) else {
        bail!("No content found at {}", url);
    };

    println!("{}", serde_json::to_string_pretty(entry)?);
    Ok(())
}

/// Print documents under `directory` plus its immediate subdirectories as JSON
pub fn list_directory(config_path: &Path, directory: &str, lang: Option<&str>) -> Result<()> {
    let (config, entries) = load(config_path)?;
    let lang = language_filter(&config, lang);

    let listing = DirectoryListing {
        directory,
        entries: catalog::in_directory(&entries, directory, lang),
        sub_directories: catalog::sub_directories(&entries, directory, lang),
    };

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
