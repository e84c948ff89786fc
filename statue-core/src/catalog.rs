//! Read-only lookups over a scanned corpus, used by page routing and navigation.

use crate::{
    models::{ContentEntry, DirectoryInfo},
    slug::title_from_slug,
};

/// Directory name that selects documents at the language root
pub const ROOT_DIRECTORY: &str = "root";

fn in_language<'a>(
    entries: &'a [ContentEntry],
    lang: Option<&'a str>,
) -> impl Iterator<Item = &'a ContentEntry> + 'a {
    entries
        .iter()
        .filter(move |e| lang.map_or(true, |l| e.lang == l))
}

fn trim_trailing_slash(url: &str) -> &str {
    if url.len() > 1 {
        url.strip_suffix('/').unwrap_or(url)
    } else {
        url
    }
}

/// Find the entry served at `url`; trailing slashes are ignored on both sides
pub fn find_by_url<'a>(
    entries: &'a [ContentEntry],
    url: &str,
    lang: Option<&str>,
) -> Option<&'a ContentEntry> {
    let wanted = trim_trailing_slash(url);
    let found = entries
        .iter()
        .filter(|e| lang.map_or(true, |l| e.lang == l))
        .find(|e| trim_trailing_slash(&e.url) == wanted);

    match found {
        Some(entry) => tracing::debug!("Matched {} ({})", entry.url, entry.lang),
        None => tracing::debug!("No content at {}", wanted),
    }
    found
}

/// Entries in `directory` and all of its subdirectories
///
/// `"root"` selects documents placed directly in the language root.
pub fn in_directory<'a>(
    entries: &'a [ContentEntry],
    directory: &str,
    lang: Option<&'a str>,
) -> Vec<&'a ContentEntry> {
    let prefix = format!("{}/", directory);
    in_language(entries, lang)
        .filter(|e| {
            if directory == ROOT_DIRECTORY {
                e.directory.is_empty()
            } else {
                e.directory == directory || e.directory.starts_with(&prefix)
            }
        })
        .collect()
}

/// Immediate child directories of `directory` that contain documents, in scan order
pub fn sub_directories(
    entries: &[ContentEntry],
    directory: &str,
    lang: Option<&str>,
) -> Vec<DirectoryInfo> {
    let prefix = format!("{}/", directory);
    let mut names: Vec<&str> = Vec::new();

    for entry in in_language(entries, lang) {
        let Some(rest) = entry.directory.strip_prefix(&prefix) else {
            continue;
        };
        let child = rest.split('/').next().unwrap_or_default();
        if !child.is_empty() && !names.contains(&child) {
            names.push(child);
        }
    }

    names
        .into_iter()
        .map(|name| DirectoryInfo {
            name: name.to_string(),
            path: format!("{}/{}", directory, name),
            title: title_from_slug(name),
            url: format!("/{}/{}", directory, name),
        })
        .collect()
}

/// Top-level content directories holding at least one document, in scan order
pub fn top_level_directories(entries: &[ContentEntry], lang: Option<&str>) -> Vec<DirectoryInfo> {
    let mut names: Vec<&str> = Vec::new();
    for entry in in_language(entries, lang) {
        let name = entry.main_directory.as_str();
        if name != ROOT_DIRECTORY && !names.contains(&name) {
            names.push(name);
        }
    }

    names
        .into_iter()
        .map(|name| DirectoryInfo {
            name: name.to_string(),
            path: format!("content/{}", name),
            title: title_from_slug(name),
            url: format!("/{}", name),
        })
        .collect()
}

/// Every path a static export must render: documents, directory listings and `/`
pub fn prerender_paths(entries: &[ContentEntry]) -> Vec<String> {
    let mut paths: Vec<String> = entries
        .iter()
        .map(|e| e.url.clone())
        .filter(|url| !url.contains("[slug]"))
        .collect();
    paths.extend(
        top_level_directories(entries, None)
            .into_iter()
            .map(|d| d.url),
    );
    paths.push("/".to_string());
    paths
}
