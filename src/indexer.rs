//! Content discovery and loading.

pub mod types;
pub mod workspace;

pub use types::IndexerError;
pub use workspace::Workspace;
