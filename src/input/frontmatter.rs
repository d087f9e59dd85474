//! Front matter and data file parsing.
//!
//! Markdown and MDX files start with a YAML block fenced by `---` lines.
//! Data files (resume) are JSON or JSON with comments and have no body.

use serde_json::Value;
use thiserror::Error;

use super::content::ContentFormat;
use crate::types::SourcePosition;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterError {
    #[error("Front matter opened with '---' is never closed")]
    Unterminated,

    #[error("Invalid YAML front matter: {message}")]
    Yaml { message: String },

    #[error("Invalid JSON{}: {message}", format_position(*.position))]
    Json { message: String, position: Option<SourcePosition> },

    #[error("Expected an object at the top level, found {found}")]
    NotAnObject { found: &'static str },
}

fn format_position(position: Option<SourcePosition>) -> String {
    position.map(|p| format!(" at {p}")).unwrap_or_default()
}

/// Parsed file: raw data to validate and the body, if the format has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub data: Value,
    pub body: Option<String>,
}

/// Parses a content file according to its format.
///
/// # Errors
/// Returns an error if the front matter is malformed or the data is not an object.
pub fn parse_document(text: &str, format: ContentFormat) -> Result<Document, FrontMatterError> {
    match format {
        ContentFormat::Markdown | ContentFormat::Mdx => parse_markdown(text),
        ContentFormat::Json => {
            let data: Value = serde_json::from_str(text).map_err(|e| FrontMatterError::Json {
                position: Some(SourcePosition::from(&e)),
                message: e.to_string(),
            })?;
            Ok(Document { data: expect_object(data)?, body: None })
        }
        ContentFormat::Jsonc => {
            let data = parse_jsonc(text)
                .map_err(|message| FrontMatterError::Json { message, position: None })?;
            Ok(Document { data: expect_object(data)?, body: None })
        }
    }
}

/// Parses JSON with comments and trailing commas into a serde value.
///
/// An empty document parses as `null`.
///
/// # Errors
/// Returns the parser message on syntax errors.
pub fn parse_jsonc(text: &str) -> Result<Value, String> {
    jsonc_parser::parse_to_serde_value(text, &jsonc_parser::ParseOptions::default())
        .map(Option::unwrap_or_default)
        .map_err(|e| e.to_string())
}

/// Splits and parses a Markdown or MDX file.
fn parse_markdown(text: &str) -> Result<Document, FrontMatterError> {
    let Some((yaml, body)) = split_front_matter(text)? else {
        // No front matter: the schema decides whether that is acceptable.
        return Ok(Document {
            data: Value::Object(serde_json::Map::new()),
            body: Some(text.to_string()),
        });
    };

    if yaml.trim().is_empty() {
        return Ok(Document {
            data: Value::Object(serde_json::Map::new()),
            body: Some(body.to_string()),
        });
    }

    let data: Value = serde_saphyr::from_str(yaml)
        .map_err(|e| FrontMatterError::Yaml { message: e.to_string() })?;

    Ok(Document { data: expect_object(data)?, body: Some(body.to_string()) })
}

/// Splits `text` into the YAML block and the body.
///
/// Returns `Ok(None)` when the file does not start with a `---` fence.
fn split_front_matter(text: &str) -> Result<Option<(&str, &str)>, FrontMatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok(None);
    };
    if first.trim_end() != "---" {
        return Ok(None);
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == "---" {
            let yaml = text.get(yaml_start..offset).unwrap_or_default();
            let body = text.get(offset + line.len()..).unwrap_or_default();
            return Ok(Some((yaml, body)));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// Null (an empty YAML block) is treated as an empty object.
fn expect_object(value: Value) -> Result<Value, FrontMatterError> {
    match value {
        Value::Object(_) => Ok(value),
        Value::Null => Ok(Value::Object(serde_json::Map::new())),
        other => Err(FrontMatterError::NotAnObject { found: value_type_name(&other) }),
    }
}

/// Human readable JSON type name for error messages.
#[must_use]
pub const fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn test_parse_markdown_with_front_matter() {
        let text = "---\ntitle: Hello\ntags:\n  - rust\n---\n# Body\n\nText.\n";

        let document = parse_document(text, ContentFormat::Markdown).unwrap();

        expect_that!(document.data, eq(&json!({ "title": "Hello", "tags": ["rust"] })));
        expect_that!(document.body, some(eq("# Body\n\nText.\n")));
    }

    #[googletest::test]
    fn test_parse_markdown_without_front_matter() {
        let document = parse_document("# Just a body\n", ContentFormat::Mdx).unwrap();

        expect_that!(document.data, eq(&json!({})));
        expect_that!(document.body, some(eq("# Just a body\n")));
    }

    #[googletest::test]
    fn test_parse_markdown_empty_front_matter() {
        let document = parse_document("---\n---\nbody", ContentFormat::Markdown).unwrap();

        expect_that!(document.data, eq(&json!({})));
        expect_that!(document.body, some(eq("body")));
    }

    #[googletest::test]
    fn test_parse_markdown_crlf_and_bom() {
        let text = "\u{feff}---\r\ntitle: Hi\r\n---\r\nbody";

        let document = parse_document(text, ContentFormat::Markdown).unwrap();

        expect_that!(document.data, eq(&json!({ "title": "Hi" })));
        expect_that!(document.body, some(eq("body")));
    }

    #[googletest::test]
    fn test_parse_markdown_keeps_dates_as_strings() {
        let text = "---\npubDate: 2024-01-15\n---\n";

        let document = parse_document(text, ContentFormat::Markdown).unwrap();

        expect_that!(document.data, eq(&json!({ "pubDate": "2024-01-15" })));
    }

    #[rstest]
    fn test_parse_markdown_unterminated() {
        let result = parse_document("---\ntitle: Hello\n", ContentFormat::Markdown);

        assert_eq!(result, Err(FrontMatterError::Unterminated));
    }

    #[rstest]
    fn test_parse_markdown_invalid_yaml() {
        let result = parse_document("---\ntitle: [unclosed\n---\n", ContentFormat::Markdown);

        assert!(matches!(result, Err(FrontMatterError::Yaml { .. })));
    }

    #[rstest]
    #[case::list("---\n- a\n- b\n---\n", "array")]
    #[case::scalar("---\njust text\n---\n", "string")]
    fn test_parse_markdown_not_an_object(#[case] text: &str, #[case] found: &'static str) {
        let result = parse_document(text, ContentFormat::Markdown);

        assert_eq!(result, Err(FrontMatterError::NotAnObject { found }));
    }

    #[googletest::test]
    fn test_parse_json_document() {
        let document =
            parse_document(r#"{ "diplomas": [] }"#, ContentFormat::Json).unwrap();

        expect_that!(document.data, eq(&json!({ "diplomas": [] })));
        expect_that!(document.body, none());
    }

    #[rstest]
    fn test_parse_json_rejects_comments() {
        let result = parse_document("{ // nope\n }", ContentFormat::Json);

        assert!(matches!(result, Err(FrontMatterError::Json { position: Some(_), .. })));
    }

    #[googletest::test]
    fn test_parse_jsonc_document() {
        let text = "{\n  // education\n  \"diplomas\": [],\n}";

        let document = parse_document(text, ContentFormat::Jsonc).unwrap();

        expect_that!(document.data, eq(&json!({ "diplomas": [] })));
    }

    #[rstest]
    fn test_parse_jsonc_syntax_error() {
        let result = parse_document("{ \"a\": }", ContentFormat::Jsonc);

        assert!(matches!(result, Err(FrontMatterError::Json { position: None, .. })));
    }
}
