//! Test helpers shared by several test modules.
#![cfg(test)]
#![allow(clippy::panic)]

use std::path::Path;

use crate::db::ContentDatabaseImpl;
use crate::input::{
    ContentFile,
    ContentFormat,
};

/// Locales used across tests.
pub(crate) fn locales() -> Vec<String> {
    vec!["en".to_string(), "fr".to_string()]
}

/// Creates a `ContentFile` input as the indexer would for `src/data/<collection>/<entry_path>`.
pub(crate) fn create_content_file(
    db: &ContentDatabaseImpl,
    collection: &str,
    entry_path: &str,
    text: &str,
) -> ContentFile {
    let format = ContentFormat::from_path(entry_path).unwrap_or(ContentFormat::Markdown);
    ContentFile::new(
        db,
        collection.to_string(),
        format!("src/data/{collection}/{entry_path}"),
        entry_path.to_string(),
        text.to_string(),
        format,
    )
}

/// A valid blog post written by `main-author`.
pub(crate) fn blog_markdown(title: &str, mapping_key: &str, draft: bool) -> String {
    format!(
        "---\ntitle: {title}\ndescription: About {title}\nauthors:\n  - main-author\npubDate: 2024-01-15\ncategories: [news]\ntags: [astro]\nmappingKey: {mapping_key}\ndraft: {draft}\n---\nHello from {title}.\n"
    )
}

/// Writes `text` to `root/relative`, creating parent directories.
pub(crate) fn write_file(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create {parent:?}: {e}"));
    }
    std::fs::write(&path, text).unwrap_or_else(|e| panic!("write {path:?}: {e}"));
}
