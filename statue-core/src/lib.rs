//! # statue-core
//!
//! Core library for the statue static site generator.
//!
//! This crate scans markdown content into normalized entries, expands site
//! template variables, renders HTML, and maintains the incremental JSON search
//! index consumed by the client-side search widget.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod excerpt;
pub mod frontmatter;
pub mod index;
pub mod keywords;
pub mod markdown;
pub mod models;
pub mod persistence;
pub mod pipeline;
pub mod scanner;
pub mod slug;
pub mod template;

pub use cache::ContentCache;
pub use config::{Config, ContentRoot, ErrorPolicy};
pub use index::{IndexBuilder, IndexOutcome, IndexStats, Staleness};
pub use models::{
    ContentEntry, DirectoryInfo, EntryMetadata, IndexDocument, IndexEntry, MetadataRecord,
    PreviousIndex,
};
pub use pipeline::{IndexOptions, PipelineError, SearchIndexPipeline};
pub use scanner::{ContentScanner, ScanError};
pub use slug::title_from_slug;
pub use template::TemplateExpander;
