//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// Error when failing to read a file
    #[error("Failed to read file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A validation worker panicked or was cancelled.
    #[error("Validation task failed: {0}")]
    Join(String),
}
