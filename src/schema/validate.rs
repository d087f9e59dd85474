//! Validation of raw (JSON/YAML) data against a collection schema.

use chrono::{
    DateTime,
    NaiveDate,
    NaiveDateTime,
    Utc,
};
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;
use url::Url;

use super::fields::{
    CollectionSchema,
    FieldDef,
    FieldKind,
    Presence,
};
use super::value::{
    EntryData,
    EntryRef,
    FieldValue,
};
use crate::input::frontmatter::value_type_name;

/// Extensions accepted for image fields.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "svg", "avif"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid field '{field_path}': {message}")]
pub struct FieldError {
    /// Path to the field (e.g., "hardSkills[2].percentage")
    pub field_path: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

impl CollectionSchema {
    /// Validates raw entry data and coerces it into typed values.
    ///
    /// Unknown fields are dropped. A `null` value counts as absent.
    ///
    /// # Errors
    /// Returns every field that does not satisfy the schema.
    pub fn validate(&self, data: &Value) -> Result<EntryData, Vec<FieldError>> {
        let mut errors = Vec::new();

        let Value::Object(map) = data else {
            return Err(vec![FieldError::new(
                "",
                format!("expected an object, found {}", value_type_name(data)),
            )]);
        };

        let entry = validate_object(&self.fields, map, None, &mut errors);

        if errors.is_empty() { Ok(entry) } else { Err(errors) }
    }
}

/// `prefix.name`, or `name` at the top level.
fn join_path(prefix: Option<&str>, name: &str) -> String {
    prefix.map_or_else(|| name.to_string(), |p| format!("{p}.{name}"))
}

/// Validates declared fields; errors are collected, unknown keys skipped.
fn validate_object(
    fields: &[FieldDef],
    map: &Map<String, Value>,
    prefix: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> EntryData {
    let mut entry = EntryData::new();

    for field in fields {
        let path = join_path(prefix, &field.name);

        match map.get(&field.name).filter(|value| !value.is_null()) {
            Some(value) => {
                if let Some(validated) = validate_value(&field.kind, value, &path, errors) {
                    entry.insert(field.name.clone(), validated);
                }
            }
            None => match &field.presence {
                Presence::Required => errors.push(FieldError::new(path, "is required")),
                Presence::Optional => {}
                Presence::Default(default) => {
                    entry.insert(field.name.clone(), default.clone());
                }
            },
        }
    }

    entry
}

/// Error for a value of the wrong JSON type.
fn type_error(path: &str, expected: &str, found: &Value) -> FieldError {
    FieldError::new(path, format!("expected {expected}, found {}", value_type_name(found)))
}

/// Validates and coerces one value; `None` when an error was recorded.
fn validate_value(
    kind: &FieldKind,
    value: &Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<FieldValue> {
    let result = match (kind, value) {
        (FieldKind::Text, Value::String(s)) => Ok(FieldValue::Text(s.clone())),
        (FieldKind::Number { min, max }, Value::Number(n)) => {
            validate_number(n.as_f64(), *min, *max, path)
        }
        (FieldKind::Boolean, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),
        (FieldKind::Enumeration(options), Value::String(s)) => {
            if options.iter().any(|option| option == s) {
                Ok(FieldValue::Text(s.clone()))
            } else {
                let expected =
                    options.iter().map(|o| format!("'{o}'")).collect::<Vec<_>>().join(", ");
                Err(FieldError::new(path, format!("expected one of {expected}, found '{s}'")))
            }
        }
        (FieldKind::Url, Value::String(s)) => Url::parse(s)
            .map(FieldValue::Url)
            .map_err(|e| FieldError::new(path, format!("invalid URL '{s}': {e}"))),
        (FieldKind::Date, Value::String(s)) => parse_date(s)
            .map(FieldValue::Date)
            .ok_or_else(|| FieldError::new(path, format!("invalid date '{s}'"))),
        (FieldKind::Image, Value::String(s)) => validate_image(s, path),
        (FieldKind::Reference(collection), Value::String(s)) => {
            let id = s.trim();
            if id.is_empty() {
                Err(FieldError::new(path, format!("reference to '{collection}' cannot be empty")))
            } else {
                Ok(FieldValue::Reference(EntryRef {
                    collection: collection.clone(),
                    id: id.to_string(),
                }))
            }
        }
        (FieldKind::List(item), Value::Array(items)) => {
            let values = items
                .iter()
                .enumerate()
                .filter_map(|(index, value)| {
                    validate_value(item, value, &format!("{path}[{index}]"), errors)
                })
                .collect();
            Ok(FieldValue::List(values))
        }
        (FieldKind::Object(fields), Value::Object(map)) => {
            Ok(FieldValue::Object(validate_object(fields, map, Some(path), errors)))
        }
        (FieldKind::Text, _) => Err(type_error(path, "a string", value)),
        (FieldKind::Number { .. }, _) => Err(type_error(path, "a number", value)),
        (FieldKind::Boolean, _) => Err(type_error(path, "a boolean", value)),
        (FieldKind::Enumeration(_), _) => Err(type_error(path, "a string", value)),
        (FieldKind::Url, _) => Err(type_error(path, "a URL string", value)),
        (FieldKind::Date, _) => Err(type_error(path, "a date string", value)),
        (FieldKind::Image, _) => Err(type_error(path, "an image path", value)),
        (FieldKind::Reference(_), _) => Err(type_error(path, "an entry id", value)),
        (FieldKind::List(_), _) => Err(type_error(path, "an array", value)),
        (FieldKind::Object(_), _) => Err(type_error(path, "an object", value)),
    };

    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

/// Checks inclusive bounds.
fn validate_number(
    number: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    path: &str,
) -> Result<FieldValue, FieldError> {
    let Some(n) = number else {
        return Err(FieldError::new(path, "number is out of range"));
    };
    if let Some(min) = min
        && n < min
    {
        return Err(FieldError::new(path, format!("must be greater than or equal to {min}")));
    }
    if let Some(max) = max
        && n > max
    {
        return Err(FieldError::new(path, format!("must be less than or equal to {max}")));
    }
    Ok(FieldValue::Number(n))
}

/// Accepts paths with a known image extension.
fn validate_image(path_value: &str, path: &str) -> Result<FieldValue, FieldError> {
    let extension = std::path::Path::new(path_value)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => {
            Ok(FieldValue::Image(path_value.to_string()))
        }
        _ => Err(FieldError::new(
            path,
            format!(
                "'{path_value}' is not an image (expected one of: {})",
                IMAGE_EXTENSIONS.join(", ")
            ),
        )),
    }
}

/// Parses the date forms authors write in front matter.
///
/// A date without a time is midnight UTC; a date-time without an offset is UTC.
#[must_use]
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
