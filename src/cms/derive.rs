//! Derivation of the editor configuration from the schema registry.

use std::collections::BTreeMap;

use super::types::{
    CloudConfig,
    CmsBrand,
    CmsCollection,
    CmsConfig,
    CmsField,
    CmsFieldKind,
    CmsFormat,
    CmsStorage,
    CmsUi,
};
use super::CmsError;
use crate::config::{
    CmsStorageMode,
    SiteSettings,
};
use crate::schema::{
    CmsExposure,
    CollectionFormat,
    CollectionSchema,
    FieldDef,
    FieldKind,
    FieldValue,
    Presence,
    SchemaRegistry,
};

/// Name of the body field of Markdown entries.
pub(super) const BODY_FIELD: &str = "content";

impl CmsConfig {
    /// Builds the editor configuration for every exposed collection.
    ///
    /// `is_dev` selects local storage when the storage mode is `auto`.
    ///
    /// # Errors
    /// Returns [`CmsError::MissingCloudProject`] when cloud storage is
    /// selected without a project.
    pub fn from_registry(
        registry: &SchemaRegistry,
        settings: &SiteSettings,
        is_dev: bool,
    ) -> Result<Self, CmsError> {
        let storage = match settings.cms.storage {
            CmsStorageMode::Auto if is_dev => CmsStorage::Local,
            CmsStorageMode::Local => CmsStorage::Local,
            CmsStorageMode::Auto | CmsStorageMode::Cloud => CmsStorage::Cloud,
        };
        let cloud = settings.cms.cloud_project.clone().map(|project| CloudConfig { project });
        if storage == CmsStorage::Cloud && cloud.is_none() {
            return Err(CmsError::MissingCloudProject);
        }

        let mut collections = BTreeMap::new();
        let mut singletons = BTreeMap::new();
        for schema in registry.iter() {
            match schema.cms {
                CmsExposure::Collection => {
                    collections.insert(schema.name.clone(), collection_from_schema(schema, settings));
                }
                CmsExposure::Singleton => {
                    singletons.insert(schema.name.clone(), collection_from_schema(schema, settings));
                }
                CmsExposure::Hidden => {
                    tracing::debug!(collection = %schema.name, "Collection hidden from the editor");
                }
            }
        }

        Ok(Self {
            storage,
            cloud,
            ui: CmsUi { brand: CmsBrand { name: settings.cms.brand_name.clone() } },
            collections,
            singletons,
        })
    }
}

/// Editor collection for one schema.
///
/// Localized collections are rooted at the editor locale's directory.
/// Singletons point at the single entry of that locale.
pub(super) fn collection_from_schema(schema: &CollectionSchema, settings: &SiteSettings) -> CmsCollection {
    let content_dir = settings.content_dir.trim_start_matches("./").trim_matches('/');
    let locale = &settings.cms.locale;
    let path = match (schema.localized, schema.cms) {
        (true, CmsExposure::Singleton) => format!("{content_dir}/{}/{locale}", schema.name),
        (true, _) => format!("{content_dir}/{}/{locale}/*", schema.name),
        (false, _) => format!("{content_dir}/{}/*", schema.name),
    };

    let format = match schema.format {
        CollectionFormat::Markdown => CmsFormat::Mdx,
        CollectionFormat::Data => CmsFormat::Json,
    };

    CmsCollection {
        label: label_for(&schema.name),
        path,
        format,
        slug_field: if schema.cms == CmsExposure::Singleton {
            None
        } else {
            schema.slug_field().map(String::from)
        },
        schema: schema_fields(schema),
    }
}

/// Editor fields of a schema; Markdown entries get a trailing body field.
pub(super) fn schema_fields(schema: &CollectionSchema) -> Vec<CmsField> {
    let mut fields: Vec<CmsField> = schema.fields.iter().map(field_from_def).collect();
    if schema.format == CollectionFormat::Markdown {
        fields.push(CmsField {
            name: BODY_FIELD.to_string(),
            label: "Content".to_string(),
            required: false,
            kind: CmsFieldKind::Markdown,
        });
    }
    fields
}

/// Editor field for one schema field.
pub(super) fn field_from_def(def: &FieldDef) -> CmsField {
    let kind = match &def.kind {
        FieldKind::Boolean => CmsFieldKind::Checkbox {
            default_value: match &def.presence {
                Presence::Default(FieldValue::Bool(value)) => *value,
                _ => false,
            },
        },
        FieldKind::Enumeration(options) => CmsFieldKind::Select {
            options: options.clone(),
            default_value: match &def.presence {
                Presence::Default(FieldValue::Text(value)) => Some(value.clone()),
                _ => options.first().cloned(),
            },
        },
        other => kind_from_field_kind(&def.name, other),
    };

    CmsField {
        name: def.name.clone(),
        label: label_for(&def.name),
        // checkboxes always hold a value
        required: def.is_required() && !matches!(def.kind, FieldKind::Boolean),
        kind,
    }
}

/// Editor kind for fields that need no presence information.
fn kind_from_field_kind(name: &str, kind: &FieldKind) -> CmsFieldKind {
    match kind {
        FieldKind::Text => CmsFieldKind::Text,
        FieldKind::Number { min, max } => CmsFieldKind::Number { min: *min, max: *max },
        FieldKind::Boolean => CmsFieldKind::Checkbox { default_value: false },
        FieldKind::Enumeration(options) => CmsFieldKind::Select {
            options: options.clone(),
            default_value: options.first().cloned(),
        },
        FieldKind::Url => CmsFieldKind::Url,
        FieldKind::Date => CmsFieldKind::Date,
        FieldKind::Image => CmsFieldKind::Image,
        FieldKind::Reference(collection) => {
            CmsFieldKind::Relationship { collection: collection.clone() }
        }
        FieldKind::List(item) => CmsFieldKind::Array {
            item: Box::new(CmsField {
                name: name.to_string(),
                label: label_for(name),
                required: true,
                kind: kind_from_field_kind(name, item),
            }),
        },
        FieldKind::Object(fields) => {
            CmsFieldKind::Object { fields: fields.iter().map(field_from_def).collect() }
        }
    }
}

/// Human label for a camelCase name: `titleLong` becomes `Title Long`.
pub(super) fn label_for(name: &str) -> String {
    let mut label = String::with_capacity(name.len() + 4);
    for (index, ch) in name.chars().enumerate() {
        if index == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            label.push(' ');
            label.push(ch);
        } else {
            label.push(ch);
        }
    }
    label
}
