//! Validated field values.

use std::collections::BTreeMap;

use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;
use url::Url;

/// Validated fields of one entry (or of a nested object), keyed by field name.
pub type EntryData = BTreeMap<String, FieldValue>;

/// Reference to an entry in another collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryRef {
    pub collection: String,
    pub id: String,
}

/// A field value after validation and coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Dates are coerced to UTC timestamps.
    Date(DateTime<Utc>),
    Url(Url),
    /// Image path as written in the file, relative to the entry.
    Image(String),
    Reference(EntryRef),
    List(Vec<FieldValue>),
    Object(EntryData),
}

impl FieldValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Image(s) => Some(s),
            Self::Url(url) => Some(url.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(date) => Some(date),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&EntryData> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_reference(&self) -> Option<&EntryRef> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Collects every reference in this value with its field path.
    pub(crate) fn collect_references<'a>(
        &'a self,
        path: &str,
        out: &mut Vec<(String, &'a EntryRef)>,
    ) {
        match self {
            Self::Reference(reference) => out.push((path.to_string(), reference)),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    item.collect_references(&format!("{path}[{index}]"), out);
                }
            }
            Self::Object(fields) => {
                for (name, value) in fields {
                    value.collect_references(&format!("{path}.{name}"), out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn author(id: &str) -> FieldValue {
        FieldValue::Reference(EntryRef { collection: "authors".to_string(), id: id.to_string() })
    }

    #[googletest::test]
    fn test_accessors() {
        expect_that!(FieldValue::Text("a".to_string()).as_str(), some(eq("a")));
        expect_that!(FieldValue::Bool(true).as_bool(), some(eq(true)));
        expect_that!(FieldValue::Number(3.0).as_number(), some(eq(3.0)));
        expect_that!(FieldValue::Number(3.0).as_str(), none());
        expect_that!(author("main").as_reference().map(|r| r.id.as_str()), some(eq("main")));
    }

    #[googletest::test]
    fn test_collect_references_nested() {
        let mut inner = EntryData::new();
        inner.insert("reviewer".to_string(), author("second"));
        let value = FieldValue::List(vec![author("main"), FieldValue::Object(inner)]);

        let mut out = Vec::new();
        value.collect_references("authors", &mut out);

        let paths: Vec<String> = out.iter().map(|(path, _)| path.clone()).collect();
        expect_that!(paths, elements_are![eq("authors[0]"), eq("authors[1].reviewer")]);
    }

    #[googletest::test]
    fn test_serialize_untagged() {
        let mut data = EntryData::new();
        data.insert("title".to_string(), FieldValue::Text("Hello".to_string()));
        data.insert("order".to_string(), FieldValue::Number(2.0));

        let json = serde_json::to_value(&data).unwrap();

        expect_that!(json, eq(&serde_json::json!({ "title": "Hello", "order": 2.0 })));
    }
}
