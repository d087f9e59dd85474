//! Content schema registry.
//!
//! Declares the shape of every content collection and validates raw entry
//! data against it.

mod collections;
mod fields;
mod validate;
mod value;

use std::sync::LazyLock;

pub use collections::{
    CAREER_TYPES,
    DATA_PATTERN,
    MARKDOWN_PATTERN,
};
pub use fields::{
    CmsExposure,
    CollectionFormat,
    CollectionSchema,
    FieldDef,
    FieldKind,
    Presence,
};
pub use validate::{
    FieldError,
    parse_date,
};
pub use value::{
    EntryData,
    EntryRef,
    FieldValue,
};

/// Built-in registry of the site's collections.
static BUILTIN: LazyLock<SchemaRegistry> = LazyLock::new(|| {
    SchemaRegistry::new(vec![
        collections::blog(),
        collections::authors(),
        collections::services(),
        collections::careers(),
        collections::projects(),
        collections::resume(),
        collections::other_pages(),
        collections::code_toggles(),
    ])
});

/// Ordered set of collection schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRegistry {
    collections: Vec<CollectionSchema>,
}

impl SchemaRegistry {
    #[must_use]
    pub const fn new(collections: Vec<CollectionSchema>) -> Self {
        Self { collections }
    }

    /// The site's built-in collections.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CollectionSchema> {
        self.collections.iter().find(|schema| schema.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectionSchema> {
        self.collections.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(|schema| schema.name.as_str())
    }

    /// Reference fields pointing at collections that are not registered.
    ///
    /// Returns `(collection, field path, target)` triples.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<(String, String, String)> {
        let mut dangling = Vec::new();
        for schema in &self.collections {
            for field in &schema.fields {
                self.collect_dangling(&schema.name, &field.name, &field.kind, &mut dangling);
            }
        }
        dangling
    }

    /// Walks one field kind, descending into lists and objects.
    fn collect_dangling(
        &self,
        collection: &str,
        path: &str,
        kind: &FieldKind,
        out: &mut Vec<(String, String, String)>,
    ) {
        match kind {
            FieldKind::Reference(target) if self.get(target).is_none() => {
                out.push((collection.to_string(), path.to_string(), target.clone()));
            }
            FieldKind::List(item) => self.collect_dangling(collection, path, item, out),
            FieldKind::Object(fields) => {
                for field in fields {
                    let nested = format!("{path}.{}", field.name);
                    self.collect_dangling(collection, &nested, &field.kind, out);
                }
            }
            _ => {}
        }
    }
}
