//! CLI command implementations.

pub mod content;
pub mod index;
pub mod search;

pub use content::{list_directory, list_paths, show_entry};
pub use index::generate_index;
pub use search::search_index;
