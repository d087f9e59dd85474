//! Divergence between an editor configuration and the schema registry.

use std::collections::BTreeMap;
use std::fmt;

use super::derive::{
    BODY_FIELD,
    schema_fields,
};
use super::types::{
    CmsCollection,
    CmsConfig,
    CmsField,
    CmsFieldKind,
};
use crate::schema::{
    CmsExposure,
    SchemaRegistry,
};

/// One difference between the editor and the content schemas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmsDrift {
    /// An exposed collection the editor does not declare.
    MissingCollection { collection: String },
    /// An editor collection with no exposed schema.
    UnknownCollection { collection: String },
    /// A schema field the editor does not declare.
    MissingField { collection: String, field: String },
    /// An editor field with no schema counterpart; the validator strips it.
    ExtraField { collection: String, field: String },
    KindMismatch { collection: String, field: String, expected: String, found: String },
    RequiredMismatch { collection: String, field: String, expected: bool },
}

impl fmt::Display for CmsDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCollection { collection } => {
                write!(f, "{collection}: collection is missing from the editor configuration")
            }
            Self::UnknownCollection { collection } => {
                write!(f, "{collection}: editor collection has no content schema")
            }
            Self::MissingField { collection, field } => {
                write!(f, "{collection}.{field}: field is missing from the editor configuration")
            }
            Self::ExtraField { collection, field } => {
                write!(f, "{collection}.{field}: editor field is not part of the content schema")
            }
            Self::KindMismatch { collection, field, expected, found } => {
                write!(f, "{collection}.{field}: expected a {expected} field, found {found}")
            }
            Self::RequiredMismatch { collection, field, expected } => {
                let state = if *expected { "required" } else { "optional" };
                write!(f, "{collection}.{field}: field should be {state}")
            }
        }
    }
}

/// Compares `cms` with the configuration derived from `registry`.
///
/// Storage, labels and paths are not compared; only which collections
/// exist and the names, kinds and presence of their fields.
#[must_use]
pub fn drift(cms: &CmsConfig, registry: &SchemaRegistry) -> Vec<CmsDrift> {
    let mut found = Vec::new();
    let mut expected_names = Vec::new();

    for schema in registry.iter() {
        let declared = match schema.cms {
            CmsExposure::Collection => cms.collections.get(&schema.name),
            CmsExposure::Singleton => cms.singletons.get(&schema.name),
            CmsExposure::Hidden => continue,
        };
        expected_names.push(schema.name.as_str());

        let Some(declared) = declared else {
            found.push(CmsDrift::MissingCollection { collection: schema.name.clone() });
            continue;
        };
        let expected = schema_fields(schema);
        compare_fields(&schema.name, "", &expected, &declared.schema, &mut found);
    }

    for name in declared_names(&cms.collections).chain(declared_names(&cms.singletons)) {
        if !expected_names.contains(&name) {
            found.push(CmsDrift::UnknownCollection { collection: name.to_string() });
        }
    }

    found
}

/// Names of the declared editor collections.
fn declared_names(collections: &BTreeMap<String, CmsCollection>) -> impl Iterator<Item = &str> {
    collections.keys().map(String::as_str)
}

/// Compares two field lists, recursing into arrays and objects.
fn compare_fields(
    collection: &str,
    prefix: &str,
    expected: &[CmsField],
    declared: &[CmsField],
    out: &mut Vec<CmsDrift>,
) {
    let path = |name: &str| if prefix.is_empty() { name.to_string() } else { format!("{prefix}.{name}") };

    for field in expected {
        let Some(actual) = declared.iter().find(|d| d.name == field.name) else {
            out.push(CmsDrift::MissingField { collection: collection.to_string(), field: path(&field.name) });
            continue;
        };
        compare_field(collection, &path(&field.name), field, actual, out);
    }

    for actual in declared {
        if actual.name == BODY_FIELD && prefix.is_empty() {
            continue;
        }
        if !expected.iter().any(|field| field.name == actual.name) {
            out.push(CmsDrift::ExtraField { collection: collection.to_string(), field: path(&actual.name) });
        }
    }
}

/// Compares one field present on both sides.
fn compare_field(collection: &str, path: &str, expected: &CmsField, actual: &CmsField, out: &mut Vec<CmsDrift>) {
    if expected.kind.name() != actual.kind.name() {
        out.push(CmsDrift::KindMismatch {
            collection: collection.to_string(),
            field: path.to_string(),
            expected: expected.kind.name().to_string(),
            found: actual.kind.name().to_string(),
        });
        return;
    }

    if expected.required != actual.required {
        out.push(CmsDrift::RequiredMismatch {
            collection: collection.to_string(),
            field: path.to_string(),
            expected: expected.required,
        });
    }

    match (&expected.kind, &actual.kind) {
        (
            CmsFieldKind::Relationship { collection: want },
            CmsFieldKind::Relationship { collection: have },
        ) if want != have => {
            out.push(CmsDrift::KindMismatch {
                collection: collection.to_string(),
                field: path.to_string(),
                expected: format!("relationship to {want}"),
                found: format!("relationship to {have}"),
            });
        }
        (CmsFieldKind::Array { item: want }, CmsFieldKind::Array { item: have }) => {
            compare_field(collection, &format!("{path}[]"), want, have, out);
        }
        (CmsFieldKind::Object { fields: want }, CmsFieldKind::Object { fields: have }) => {
            compare_fields(collection, path, want, have, out);
        }
        _ => {}
    }
}
