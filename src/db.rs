//! Salsa database definitions

/// Database trait for content queries.
#[salsa::db]
pub trait ContentDatabase: salsa::Database {}

/// Content database implementation.
#[salsa::db]
#[derive(Default, Clone)]
pub struct ContentDatabaseImpl {
    /// Salsa storage
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for ContentDatabaseImpl {}

#[salsa::db]
impl ContentDatabase for ContentDatabaseImpl {}

impl std::fmt::Debug for ContentDatabaseImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentDatabaseImpl").finish_non_exhaustive()
    }
}
