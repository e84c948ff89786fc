//! In-process memo of the scanned content tree.

use crate::{
    models::ContentEntry,
    scanner::{ContentScanner, ScanError},
};

/// Holds the result of one scan until explicitly invalidated
///
/// The cache is owned by whoever drives the build; nothing expires on its own.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: Option<Vec<ContentEntry>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cached entries, scanning with `scanner` on first use
    pub fn get_or_scan(&mut self, scanner: &ContentScanner) -> Result<&[ContentEntry], ScanError> {
        if self.entries.is_none() {
            let scanned = scanner.scan()?;
            self.entries = Some(scanned);
        } else {
            tracing::debug!("Using cached content scan");
        }
        Ok(self.entries.as_deref().unwrap_or(&[]))
    }

    /// Drop the cached scan so the next access rescans
    pub fn invalidate(&mut self) {
        self.entries = None;
    }

    pub fn is_populated(&self) -> bool {
        self.entries.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ContentRoot, ErrorPolicy};
    use crate::template::TemplateExpander;
    use std::fs;

    fn scanner(root: &std::path::Path) -> ContentScanner {
        let config =
            Config::from_yaml("site: {name: N, description: D, url: U, author: A}").unwrap();
        ContentScanner::new(
            vec![ContentRoot {
                path: root.to_path_buf(),
                lang: "en".into(),
            }],
            TemplateExpander::from_config(&config),
            ErrorPolicy::FailFast,
        )
    }

    #[test]
    fn test_cache_reuses_scan_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.md"), "One").unwrap();
        let scanner = scanner(dir.path());

        let mut cache = ContentCache::new();
        assert!(!cache.is_populated());
        assert_eq!(cache.get_or_scan(&scanner).unwrap().len(), 1);

        fs::write(dir.path().join("two.md"), "Two").unwrap();
        assert_eq!(cache.get_or_scan(&scanner).unwrap().len(), 1);

        cache.invalidate();
        assert!(!cache.is_populated());
        assert_eq!(cache.get_or_scan(&scanner).unwrap().len(), 2);
    }

    #[test]
    fn test_failed_scan_leaves_cache_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.md"), "---\n: [\n---\n").unwrap();

        let mut cache = ContentCache::new();
        assert!(cache.get_or_scan(&scanner(dir.path())).is_err());
        assert!(!cache.is_populated());
    }
}
