//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the statue.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub site: SiteConfig,

    #[serde(default)]
    pub contact: ContactConfig,

    #[serde(default)]
    pub social: SocialConfig,

    #[serde(default)]
    pub legal: LegalConfig,

    #[serde(default)]
    pub internationalization: Option<I18nConfig>,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub description: String,
    pub url: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactConfig {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub privacy_email: Option<String>,
    #[serde(default)]
    pub support_email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<AddressConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressConfig {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl AddressConfig {
    /// Single-line postal address: "street, city, state zip"
    pub fn full(&self) -> Option<String> {
        let street = self.street.as_deref()?;
        let city = self.city.as_deref()?;
        let state = self.state.as_deref().unwrap_or_default();
        let zip = self.zip_code.as_deref().unwrap_or_default();
        Some(format!("{}, {}, {} {}", street, city, state, zip).trim_end().to_string())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialConfig {
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalConfig {
    #[serde(default)]
    pub privacy_policy_last_updated: Option<String>,
    #[serde(default)]
    pub terms_last_updated: Option<String>,
    #[serde(default)]
    pub do_not_sell: Option<DoNotSellConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoNotSellConfig {
    #[serde(default)]
    pub processing_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub languages: Vec<String>,

    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_language() -> String {
    String::from("en")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_content_dir")]
    pub content: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output: PathBuf,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: default_content_dir(),
            output: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Top-level directories whose documents are searchable
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// File name of the artifact inside the output directory
    #[serde(default = "default_index_file")]
    pub index_file: String,

    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,

    /// Language to index (defaults to the i18n default language)
    #[serde(default)]
    pub language: Option<String>,
}

fn default_categories() -> Vec<String> {
    vec!["blog".to_string(), "docs".to_string()]
}

fn default_index_file() -> String {
    String::from("search-index.json")
}

fn default_excerpt_length() -> usize {
    crate::excerpt::DEFAULT_EXCERPT_LENGTH
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            index_file: default_index_file(),
            excerpt_length: default_excerpt_length(),
            language: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

/// What the scanner does when a single document fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Abort the whole scan on the first broken document
    #[default]
    FailFast,
    /// Log the failure and leave the document out
    Skip,
}

/// A language-scoped directory of markdown sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRoot {
    pub path: PathBuf,
    pub lang: String,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text; paths stay relative to the working directory
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Get the content directory, resolved relative to config file
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Location of the persisted search index
    pub fn index_path(&self) -> PathBuf {
        self.output_dir().join(&self.search.index_file)
    }

    pub fn i18n_enabled(&self) -> bool {
        self.internationalization
            .as_ref()
            .map(|i| i.enabled)
            .unwrap_or(false)
    }

    pub fn default_language(&self) -> String {
        self.internationalization
            .as_ref()
            .map(|i| i.default_language.clone())
            .unwrap_or_else(default_language)
    }

    /// Language whose documents go into the search index
    pub fn search_language(&self) -> String {
        self.search
            .language
            .clone()
            .unwrap_or_else(|| self.default_language())
    }

    /// Content roots to scan: one per language when i18n is on, otherwise the
    /// content directory itself under the default language.
    pub fn content_roots(&self) -> Vec<ContentRoot> {
        let content_dir = self.content_dir();
        match &self.internationalization {
            Some(i18n) if i18n.enabled => i18n
                .languages
                .iter()
                .map(|lang| ContentRoot {
                    path: content_dir.join(lang),
                    lang: lang.clone(),
                })
                .collect(),
            _ => vec![ContentRoot {
                path: content_dir,
                lang: self.default_language(),
            }],
        }
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }

    /// Get a nested config value using dotted path (e.g., "site.name")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        let address = self.contact.address.as_ref();
        match parts.as_slice() {
            ["site", "name"] => Some(self.site.name.clone()),
            ["site", "description"] => Some(self.site.description.clone()),
            ["site", "url"] => Some(self.site.url.clone()),
            ["site", "author"] => Some(self.site.author.clone()),
            ["contact", "email"] => self.contact.email.clone(),
            ["contact", "privacyEmail"] => self.contact.privacy_email.clone(),
            ["contact", "supportEmail"] => self.contact.support_email.clone(),
            ["contact", "phone"] => self.contact.phone.clone(),
            ["contact", "address", "street"] => address.and_then(|a| a.street.clone()),
            ["contact", "address", "city"] => address.and_then(|a| a.city.clone()),
            ["contact", "address", "state"] => address.and_then(|a| a.state.clone()),
            ["contact", "address", "zipCode"] => address.and_then(|a| a.zip_code.clone()),
            ["contact", "address", "country"] => address.and_then(|a| a.country.clone()),
            ["contact", "address", "full"] => address.and_then(|a| a.full()),
            ["social", "twitter"] => self.social.twitter.clone(),
            ["social", "github"] => self.social.github.clone(),
            ["social", "linkedin"] => self.social.linkedin.clone(),
            ["social", "facebook"] => self.social.facebook.clone(),
            ["social", "instagram"] => self.social.instagram.clone(),
            ["social", "youtube"] => self.social.youtube.clone(),
            ["legal", "privacyPolicyLastUpdated"] => {
                self.legal.privacy_policy_last_updated.clone()
            }
            ["legal", "termsLastUpdated"] => self.legal.terms_last_updated.clone(),
            ["legal", "doNotSell", "processingTime"] => self
                .legal
                .do_not_sell
                .as_ref()
                .and_then(|d| d.processing_time.clone()),
            _ => None,
        }
    }
}

/// Every dotted key `Config::get` answers, in table order
pub const CONFIG_VARIABLES: &[&str] = &[
    "site.name",
    "site.description",
    "site.url",
    "site.author",
    "contact.email",
    "contact.privacyEmail",
    "contact.supportEmail",
    "contact.phone",
    "contact.address.street",
    "contact.address.city",
    "contact.address.state",
    "contact.address.zipCode",
    "contact.address.country",
    "contact.address.full",
    "social.twitter",
    "social.github",
    "social.linkedin",
    "social.facebook",
    "social.instagram",
    "social.youtube",
    "legal.privacyPolicyLastUpdated",
    "legal.termsLastUpdated",
    "legal.doNotSell.processingTime",
];

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
site:
  name: "Statue SSG"
  description: "A static site generator"
  url: "https://statuessg.com"
  author: "Statue Team"
contact:
  email: "hello@example.com"
  address:
    street: "123 Statue Street"
    city: "San Francisco"
    state: "CA"
    zipCode: "94103"
legal:
  doNotSell:
    processingTime: "15 business days"
internationalization:
  enabled: true
  languages: [en, fr]
  defaultLanguage: en
"#;

    #[test]
    fn test_default_values() {
        let config = Config::from_yaml(
            "site: {name: T, description: D, url: 'https://example.com', author: A}",
        )
        .unwrap();

        assert_eq!(config.paths.content, PathBuf::from("content"));
        assert_eq!(config.index_path(), PathBuf::from("static/search-index.json"));
        assert_eq!(config.search.categories, vec!["blog", "docs"]);
        assert_eq!(config.search.excerpt_length, 200);
        assert_eq!(config.scan.on_error, ErrorPolicy::FailFast);
        assert_eq!(config.default_language(), "en");
        assert!(!config.i18n_enabled());
    }

    #[test]
    fn test_get_nested_value() {
        let config = Config::from_yaml(SAMPLE).unwrap();

        assert_eq!(config.get("site.name"), Some("Statue SSG".into()));
        assert_eq!(config.get("contact.email"), Some("hello@example.com".into()));
        assert_eq!(
            config.get("contact.address.full"),
            Some("123 Statue Street, San Francisco, CA 94103".into())
        );
        assert_eq!(
            config.get("legal.doNotSell.processingTime"),
            Some("15 business days".into())
        );
        assert_eq!(config.get("social.github"), None);
        assert_eq!(config.get("nonexistent.key"), None);
    }

    #[test]
    fn test_content_roots_follow_i18n() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        let roots = config.content_roots();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].path, PathBuf::from("content/en"));
        assert_eq!(roots[1].lang, "fr");

        let plain = Config::from_yaml(
            "site: {name: T, description: D, url: U, author: A}\npaths: {content: docs-src}",
        )
        .unwrap();
        assert_eq!(
            plain.content_roots(),
            vec![ContentRoot {
                path: PathBuf::from("docs-src"),
                lang: "en".into()
            }]
        );
    }

    #[test]
    fn test_error_policy_parses() {
        let config = Config::from_yaml(
            "site: {name: T, description: D, url: U, author: A}\nscan: {onError: skip}",
        )
        .unwrap();
        assert_eq!(config.scan.on_error, ErrorPolicy::Skip);
    }

    #[test]
    fn test_relative_paths_resolve_against_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statue.yml");
        std::fs::write(&path, "site: {name: T, description: D, url: U, author: A}").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.content_dir(), dir.path().join("content"));
        assert_eq!(
            config.index_path(),
            dir.path().join("static").join("search-index.json")
        );
    }
}
