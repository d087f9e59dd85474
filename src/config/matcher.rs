//! Maps project files to content collections.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobBuilder,
    GlobSet,
    GlobSetBuilder,
};

use super::SiteSettings;
use crate::schema::SchemaRegistry;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid pattern '{pattern}' for collection '{collection}': {source}")]
    InvalidCollectionPattern {
        collection: String,
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files against the loader patterns of every collection.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    /// Project root; absolute paths are made relative to it.
    workspace_root: PathBuf,
    /// `contentDir` without surrounding slashes.
    content_dir: String,
    /// One glob per collection, in the order of `collections`.
    collection_set: GlobSet,
    /// Collection name for each glob of `collection_set`.
    collections: Vec<String>,
    /// `excludePatterns`.
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Builds the matcher for the collections of `registry`.
    ///
    /// Each collection matches `<contentDir>/<name>/<pattern>`. Wildcards
    /// other than `**` do not cross directory separators.
    pub fn new(
        workspace_root: PathBuf,
        settings: &SiteSettings,
        registry: &SchemaRegistry,
    ) -> Result<Self, MatcherError> {
        let content_dir = normalize_dir(&settings.content_dir);

        let mut builder = GlobSetBuilder::new();
        let mut collections = Vec::new();
        for schema in registry.iter() {
            let pattern = format!("{content_dir}/{}/{}", schema.name, schema.pattern);
            let glob = GlobBuilder::new(&pattern).literal_separator(true).build().map_err(
                |source| MatcherError::InvalidCollectionPattern {
                    collection: schema.name.clone(),
                    pattern: pattern.clone(),
                    source,
                },
            )?;
            builder.add(glob);
            collections.push(schema.name.clone());
        }
        let collection_set = builder.build()?;

        let mut exclude_builder = GlobSetBuilder::new();
        for pattern in &settings.exclude_patterns {
            let glob = Glob::new(pattern).map_err(|source| MatcherError::InvalidExcludePattern {
                pattern: pattern.clone(),
                source,
            })?;
            exclude_builder.add(glob);
        }
        let exclude_set = exclude_builder.build()?;

        Ok(Self { workspace_root, content_dir, collection_set, collections, exclude_set })
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// `contentDir` resolved against the workspace root.
    #[must_use]
    pub fn content_root(&self) -> PathBuf {
        self.workspace_root.join(&self.content_dir)
    }

    /// Collection owning the file, if any.
    ///
    /// The path must be absolute and under the workspace root.
    #[must_use]
    pub fn collection_for(&self, absolute_path: &Path) -> Option<&str> {
        let relative_path = absolute_path.strip_prefix(&self.workspace_root).ok()?;
        self.collection_for_relative(relative_path)
    }

    /// Collection owning the file, if any.
    ///
    /// The path must be relative to the workspace root.
    #[must_use]
    pub fn collection_for_relative(&self, relative_path: &Path) -> Option<&str> {
        if self.exclude_set.is_match(relative_path) {
            return None;
        }
        let index = self.collection_set.matches(relative_path).into_iter().next()?;
        self.collections.get(index).map(String::as_str)
    }

    /// Path of the file below its collection base, with `/` separators.
    #[must_use]
    pub fn entry_path(&self, relative_path: &Path, collection: &str) -> Option<String> {
        let base = Path::new(&self.content_dir).join(collection);
        let entry = relative_path.strip_prefix(base).ok()?;
        let segments: Vec<_> = entry.iter().map(|part| part.to_string_lossy()).collect();
        Some(segments.join("/"))
    }
}

/// Strips `./` and surrounding slashes from a configured directory.
fn normalize_dir(dir: &str) -> String {
    dir.trim().trim_start_matches("./").trim_matches('/').to_string()
}
