//! site-content
//!
//! Content and translation layer of a multilingual website: collection
//! schemas and build-time validation, the editor configuration derived from
//! them, and locale-aware lookups for text, routes and content entries.

pub mod cms;
pub mod config;
pub mod content;
pub mod data;
pub mod db;
pub mod diagnostics;
pub mod i18n;
pub mod indexer;
pub mod input;
pub mod schema;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use content::{
    ContentEntry,
    ContentStore,
};
pub use diagnostics::{
    BuildReport,
    Diagnostic,
};
pub use indexer::Workspace;
