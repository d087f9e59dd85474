//! Workspace loading and validation.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use futures::StreamExt;
use ignore::WalkBuilder;
use salsa::Setter;

use crate::config::{
    ConfigManager,
    FileMatcher,
    SiteSettings,
};
use crate::content::{
    ContentEntry,
    ContentError,
    ContentStore,
    content_entry,
};
use crate::db::ContentDatabaseImpl;
use crate::diagnostics::{
    BuildReport,
    Diagnostic,
};
use crate::indexer::types::IndexerError;
use crate::input::{
    ContentFile,
    ContentFormat,
};
use crate::schema::SchemaRegistry;

/// A content file found on disk, before it is read.
#[derive(Debug, Clone)]
struct DiscoveredFile {
    /// Path as returned by the walk.
    absolute_path: PathBuf,
    /// Path relative to the workspace root, with `/` separators.
    relative_path: String,
    /// Owning collection.
    collection: String,
    /// Path below the collection base.
    entry_path: String,
    /// Format inferred from the extension.
    format: ContentFormat,
}

/// Content files of a project, registered as salsa inputs.
#[derive(Debug)]
pub struct Workspace {
    /// Database owning the file inputs.
    db: ContentDatabaseImpl,
    /// Settings the workspace was loaded with.
    settings: SiteSettings,
    /// Inputs keyed by path relative to the root.
    files: BTreeMap<String, ContentFile>,
    /// Files that were found but could not be read.
    read_errors: Vec<Diagnostic>,
}

impl Workspace {
    /// Discovers and reads every content file under `workspace_path`.
    ///
    /// Unreadable files are kept as error diagnostics for the next build.
    ///
    /// # Errors
    /// Returns an error when a collection or exclude pattern is invalid.
    pub async fn load(
        workspace_path: &Path,
        config_manager: &ConfigManager,
    ) -> Result<Self, IndexerError> {
        tracing::debug!(workspace_path = %workspace_path.display(), "Loading workspace");
        let settings = config_manager.get_settings().clone();
        let matcher =
            FileMatcher::new(workspace_path.to_path_buf(), &settings, SchemaRegistry::builtin())?;

        let discovered = Self::find_content_files(&matcher);
        tracing::debug!(count = discovered.len(), "Discovered content files");

        let reads: Vec<_> = futures::stream::iter(discovered)
            .map(|file| async move {
                let result = tokio::fs::read_to_string(&file.absolute_path).await;
                (file, result)
            })
            .buffer_unordered(settings.indexing.thread_count())
            .collect()
            .await;

        let db = ContentDatabaseImpl::default();
        let mut files = BTreeMap::new();
        let mut read_errors = Vec::new();
        for (file, result) in reads {
            match result {
                Ok(text) => {
                    let input = ContentFile::new(
                        &db,
                        file.collection,
                        file.relative_path.clone(),
                        file.entry_path,
                        text,
                        file.format,
                    );
                    files.insert(file.relative_path, input);
                }
                Err(source) => {
                    tracing::warn!("Failed to read file {:?}: {}", file.absolute_path, source);
                    let error = IndexerError::Io { path: file.absolute_path, source };
                    read_errors.push(Diagnostic::error(file.relative_path, error.to_string()));
                }
            }
        }
        read_errors.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Self { db, settings, files, read_errors })
    }

    /// Walks the content directory and keeps the files some collection owns.
    fn find_content_files(matcher: &FileMatcher) -> Vec<DiscoveredFile> {
        let mut found_files = Vec::new();
        let content_root = matcher.content_root();
        if !content_root.is_dir() {
            tracing::warn!(content_root = %content_root.display(), "Content directory not found");
            return found_files;
        }

        for result in WalkBuilder::new(&content_root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Ok(relative_path) = path.strip_prefix(matcher.workspace_root()) else {
                continue;
            };
            let Some(collection) = matcher.collection_for_relative(relative_path) else {
                tracing::debug!(path = %relative_path.display(), "Skipping file outside collections");
                continue;
            };
            let Some(entry_path) = matcher.entry_path(relative_path, collection) else {
                continue;
            };
            let relative_path = to_slash(relative_path);
            let Some(format) = ContentFormat::from_path(&relative_path) else {
                continue;
            };

            found_files.push(DiscoveredFile {
                absolute_path: path.to_path_buf(),
                relative_path,
                collection: collection.to_string(),
                entry_path,
                format,
            });
        }

        found_files
    }

    /// Paths of the registered files, relative to the root.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Replaces the text of a registered file.
    ///
    /// Only that file is validated again on the next build. Returns `false`
    /// when no file is registered under `relative_path`.
    pub fn update_file(&mut self, relative_path: &str, text: String) -> bool {
        let Some(file) = self.files.get(relative_path).copied() else {
            return false;
        };
        tracing::debug!(path = relative_path, "Updating file");
        file.set_text(&mut self.db).to(text);
        true
    }

    /// Validation result of one file.
    #[must_use]
    pub fn entry(&self, relative_path: &str) -> Option<Result<ContentEntry, ContentError>> {
        let file = self.files.get(relative_path)?;
        Some(content_entry(&self.db, *file))
    }

    /// Validates every file and assembles the content store.
    ///
    /// Files are validated in parallel chunks on cloned database handles.
    /// Valid entries enter the store; when two files map to the same id the
    /// later path wins and a warning is reported. Entries referencing
    /// missing entries are removed after every file is loaded.
    ///
    /// # Errors
    /// Returns an error when a validation task fails to complete.
    pub async fn build(&self) -> Result<BuildReport, IndexerError> {
        let inputs: Vec<ContentFile> = self.files.values().copied().collect();
        let threads = self.settings.indexing.thread_count();
        let chunk_size = inputs.len().div_ceil(threads).max(1);

        let tasks: Vec<_> = inputs
            .chunks(chunk_size)
            .map(|chunk| {
                let db = self.db.clone();
                let chunk = chunk.to_vec();
                tokio::task::spawn_blocking(move || {
                    chunk
                        .into_iter()
                        .map(|file| (file.path(&db).clone(), content_entry(&db, file)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut results = Vec::with_capacity(inputs.len());
        for outcome in futures::future::join_all(tasks).await {
            results.extend(outcome.map_err(|e| IndexerError::Join(e.to_string()))?);
        }
        results.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut diagnostics = self.read_errors.clone();
        let mut store = ContentStore::new(self.settings.locales.clone());
        for (path, result) in results {
            match result {
                Ok(entry) => {
                    let (collection, id) = (entry.collection.clone(), entry.id.clone());
                    if let Some(previous) = store.insert(entry) {
                        tracing::warn!(%collection, %id, "Duplicate entry id");
                        diagnostics.push(Diagnostic::warning(
                            path,
                            format!(
                                "duplicate id '{id}' in collection '{collection}' replaces {}",
                                previous.path
                            ),
                        ));
                    }
                }
                Err(error) => {
                    tracing::error!(%path, %error, "Invalid content file");
                    diagnostics.extend(Diagnostic::from_content_error(&path, &error));
                }
            }
        }

        for reference in store.prune_dangling_references() {
            tracing::error!(path = %reference.path, "Dangling reference");
            diagnostics.push(Diagnostic::from_dangling(&reference));
        }

        tracing::debug!(
            entries = store.len(),
            diagnostics = diagnostics.len(),
            "Workspace build finished"
        );
        Ok(BuildReport { store, diagnostics })
    }
}

/// Joins path components with `/`.
fn to_slash(path: &Path) -> String {
    path.iter().map(|part| part.to_string_lossy()).collect::<Vec<_>>().join("/")
}
