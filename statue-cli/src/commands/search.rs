//! Search command implementation
use anyhow::{bail, Context, Result};
use serde::Serialize;
use statue_core::{Config, IndexDocument, IndexEntry};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
struct SearchHit<'a> {
    id: &'a str,
    title: &'a str,
    url: &'a str,
    category: &'a str,
    excerpt: &'a str,
    score: usize,
}

/// Search the generated index
pub fn search_index(config_path: &Path, query: &str, limit: usize, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let index_path = config.index_path();

    if !index_path.exists() {
        bail!("Search index not found at {:?}. Run `statue index` first.", index_path);
    }

    let data = fs::read_to_string(&index_path).context("Failed to read search index")?;
    let document: IndexDocument =
        serde_json::from_str(&data).context("Failed to parse search index")?;

    let results = perform_search(&document.items, query);

    if json {
        let hits: Vec<SearchHit> = results
            .iter()
            .take(limit)
            .map(|(item, score)| SearchHit {
                id: &item.id,
                title: &item.title,
                url: &item.url,
                category: &item.category,
                excerpt: &item.excerpt,
                score: *score,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }

    println!("Found {} results for '{}':\n", results.len(), query);
    for (item, score) in results.iter().take(limit) {
        println!("{} [{}] (score: {})", item.title, item.category, score);
        println!("  {}", item.url);
        if !item.excerpt.is_empty() {
            println!("  {}", item.excerpt);
        }
        println!();
    }

    Ok(())
}

/// Case-insensitive term matching over each item's searchable text
///
/// Every query term found in the composite `content` scores one point, and one
/// more when it also appears in the title. Ties keep index order.
fn perform_search<'a>(items: &'a [IndexEntry], query: &str) -> Vec<(&'a IndexEntry, usize)> {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<(&IndexEntry, usize)> = items
        .iter()
        .filter_map(|item| {
            let content = item.content.to_lowercase();
            let title = item.title.to_lowercase();
            let score: usize = terms
                .iter()
                .map(|term| {
                    let in_content = usize::from(content.contains(term.as_str()));
                    let in_title = usize::from(title.contains(term.as_str()));
                    in_content + in_title
                })
                .sum();
            (score > 0).then_some((item, score))
        })
        .collect();

    results.sort_by(|a, b| b.1.cmp(&a.1));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str, content: &str) -> IndexEntry {
        IndexEntry {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            excerpt: String::new(),
            url: format!("/{}", id),
            category: "blog".into(),
            date: None,
            author: None,
            keywords: Vec::new(),
            content: content.into(),
        }
    }

    #[test]
    fn test_title_matches_rank_higher() {
        let items = vec![
            item("blog-a", "Cooking", "rust in cast iron pans"),
            item("blog-b", "Rust Guide", "Rust Guide ownership borrowing"),
        ];
        let results = perform_search(&items, "RUST");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0.id, "blog-b");
        assert_eq!(results[0].1, 2);
    }

    #[test]
    fn test_no_terms_no_results() {
        let items = vec![item("blog-a", "A", "alpha")];
        assert!(perform_search(&items, "   ").is_empty());
        assert!(perform_search(&items, "zeta").is_empty());
    }
}
