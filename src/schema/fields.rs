//! Field and collection declarations.

use super::value::FieldValue;

/// Shape of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    /// Number with optional inclusive bounds.
    Number { min: Option<f64>, max: Option<f64> },
    Boolean,
    /// One of a fixed set of strings.
    Enumeration(Vec<String>),
    /// Absolute URL.
    Url,
    /// Date string (or timestamp) coerced to a UTC timestamp.
    Date,
    /// Relative path to an image file.
    Image,
    /// Id of an entry in the named collection.
    Reference(String),
    List(Box<FieldKind>),
    Object(Vec<FieldDef>),
}

impl FieldKind {
    #[must_use]
    pub const fn number() -> Self {
        Self::Number { min: None, max: None }
    }

    #[must_use]
    pub const fn bounded(min: f64, max: f64) -> Self {
        Self::Number { min: Some(min), max: Some(max) }
    }

    #[must_use]
    pub fn list(item: Self) -> Self {
        Self::List(Box::new(item))
    }

    #[must_use]
    pub fn one_of(values: &[&str]) -> Self {
        Self::Enumeration(values.iter().copied().map(String::from).collect())
    }

    #[must_use]
    pub fn reference(collection: &str) -> Self {
        Self::Reference(collection.to_string())
    }

    /// Short name used in messages and drift reports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number { .. } => "number",
            Self::Boolean => "boolean",
            Self::Enumeration(_) => "enum",
            Self::Url => "url",
            Self::Date => "date",
            Self::Image => "image",
            Self::Reference(_) => "reference",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }
}

/// Whether a field must be present.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional,
    /// Optional; the value is substituted when the field is absent.
    Default(FieldValue),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl FieldDef {
    #[must_use]
    pub fn required(name: &str, kind: FieldKind) -> Self {
        Self { name: name.to_string(), kind, presence: Presence::Required }
    }

    #[must_use]
    pub fn optional(name: &str, kind: FieldKind) -> Self {
        Self { name: name.to_string(), kind, presence: Presence::Optional }
    }

    #[must_use]
    pub fn with_default(name: &str, kind: FieldKind, default: FieldValue) -> Self {
        Self { name: name.to_string(), kind, presence: Presence::Default(default) }
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }
}

/// How entries of a collection are stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionFormat {
    /// Markdown/MDX with YAML front matter.
    Markdown,
    /// JSON or JSON with comments, no body.
    Data,
}

/// How a collection is exposed to the visual editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmsExposure {
    Collection,
    Singleton,
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSchema {
    pub name: String,
    pub format: CollectionFormat,
    /// Glob relative to the collection base directory.
    pub pattern: String,
    /// Entries live in per-locale sub directories.
    pub localized: bool,
    pub cms: CmsExposure,
    pub fields: Vec<FieldDef>,
}

impl CollectionSchema {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Field the editor derives entry slugs from.
    #[must_use]
    pub fn slug_field(&self) -> Option<&str> {
        ["title", "name"].into_iter().find(|name| self.field(name).is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn schema(fields: Vec<FieldDef>) -> CollectionSchema {
        CollectionSchema {
            name: "test".to_string(),
            format: CollectionFormat::Markdown,
            pattern: "**/*.md".to_string(),
            localized: false,
            cms: CmsExposure::Hidden,
            fields,
        }
    }

    #[rstest]
    #[case::title(vec![FieldDef::required("title", FieldKind::Text)], Some("title"))]
    #[case::name(vec![FieldDef::required("name", FieldKind::Text)], Some("name"))]
    #[case::title_wins(
        vec![FieldDef::required("name", FieldKind::Text), FieldDef::required("title", FieldKind::Text)],
        Some("title")
    )]
    #[case::none(vec![FieldDef::required("language", FieldKind::Text)], None)]
    fn test_slug_field(#[case] fields: Vec<FieldDef>, #[case] expected: Option<&str>) {
        assert_eq!(schema(fields).slug_field(), expected);
    }

    #[rstest]
    fn test_presence_helpers() {
        assert!(FieldDef::required("a", FieldKind::Text).is_required());
        assert!(!FieldDef::optional("a", FieldKind::Text).is_required());
        assert!(
            !FieldDef::with_default("a", FieldKind::Boolean, FieldValue::Bool(false)).is_required()
        );
    }
}
