//! Validated content entries.

mod store;

use thiserror::Error;

pub use self::store::{
    ContentStore,
    DanglingReference,
};
use crate::db::ContentDatabase;
use crate::input::{
    ContentFile,
    FrontMatterError,
    parse_document,
};
use crate::schema::{
    EntryData,
    EntryRef,
    FieldError,
    FieldValue,
    SchemaRegistry,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Unknown collection '{0}'")]
    UnknownCollection(String),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error("Schema validation failed:\n{}", format_field_errors(.0))]
    Schema(Vec<FieldError>),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A content file that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    pub collection: String,
    /// Slugified path relative to the collection base, without extension.
    pub id: String,
    /// Path relative to the workspace root.
    pub path: String,
    pub data: EntryData,
    /// Markdown body; `None` for data collections.
    pub body: Option<String>,
}

impl ContentEntry {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.data.get(field)
    }

    /// Entries flagged `draft: true` are left out of the published set.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.get("draft").and_then(FieldValue::as_bool).unwrap_or(false)
    }

    #[must_use]
    pub fn mapping_key(&self) -> Option<&str> {
        self.get("mappingKey").and_then(FieldValue::as_str)
    }

    /// Locale of the entry: the first id segment when it is a known locale.
    #[must_use]
    pub fn locale<'a>(&'a self, locales: &[String]) -> Option<&'a str> {
        let first = self.id.split('/').next()?;
        locales.iter().any(|locale| locale == first).then_some(first)
    }

    /// Id without its locale segment.
    #[must_use]
    pub fn slug(&self, locales: &[String]) -> &str {
        self.locale(locales)
            .and_then(|locale| self.id.strip_prefix(locale))
            .map_or(self.id.as_str(), |rest| rest.trim_start_matches('/'))
    }

    /// Every reference held by the entry, with its field path.
    #[must_use]
    pub fn references(&self) -> Vec<(String, &EntryRef)> {
        let mut out = Vec::new();
        for (name, value) in &self.data {
            value.collect_references(name, &mut out);
        }
        out
    }
}

/// Derives the entry id from its path below the collection base.
///
/// The extension is dropped and each segment is slugified, so
/// `en/My First Post.md` becomes `en/my-first-post`.
#[must_use]
pub fn entry_id(entry_path: &str) -> String {
    let without_extension = match entry_path.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') && !stem.ends_with('/') && !stem.is_empty() => stem,
        _ => entry_path,
    };

    without_extension
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(slug::slugify)
        .collect::<Vec<_>>()
        .join("/")
}

/// Parses and validates a content file.
#[salsa::tracked]
pub fn content_entry(
    db: &dyn ContentDatabase,
    file: ContentFile,
) -> Result<ContentEntry, ContentError> {
    let collection = file.collection(db);
    tracing::debug!(path = %file.path(db), "Validating content file");

    let schema = SchemaRegistry::builtin()
        .get(collection)
        .ok_or_else(|| ContentError::UnknownCollection(collection.clone()))?;

    let document = parse_document(file.text(db), file.format(db))?;
    let data = schema.validate(&document.data).map_err(ContentError::Schema)?;

    Ok(ContentEntry {
        collection: collection.clone(),
        id: entry_id(file.entry_path(db)),
        path: file.path(db).clone(),
        data,
        body: document.body,
    })
}
