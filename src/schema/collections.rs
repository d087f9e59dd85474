//! Built-in content collections of the site.
//!
//! These declarations are the single source of truth: the build validator
//! reads them directly and the CMS configuration is derived from them.

use super::fields::{
    CmsExposure,
    CollectionFormat,
    CollectionSchema,
    FieldDef,
    FieldKind,
};
use super::value::FieldValue;

/// Markdown loader pattern. Files whose name starts with `_` are ignored.
pub const MARKDOWN_PATTERN: &str = "**/[!_]*.{md,mdx}";
/// Data loader pattern. Files whose name starts with `_` are ignored.
pub const DATA_PATTERN: &str = "**/[!_]*.{json,jsonc}";

/// Career posting types.
pub const CAREER_TYPES: &[&str] = &["Full-time", "Part-time", "Contract", "Remote"];

/// Markdown collection using the default loader pattern.
fn markdown(name: &str, localized: bool, cms: CmsExposure, fields: Vec<FieldDef>) -> CollectionSchema {
    CollectionSchema {
        name: name.to_string(),
        format: CollectionFormat::Markdown,
        pattern: MARKDOWN_PATTERN.to_string(),
        localized,
        cms,
        fields,
    }
}

/// Required text field.
fn text(name: &str) -> FieldDef {
    FieldDef::required(name, FieldKind::Text)
}

/// Required list of strings.
fn texts(name: &str) -> FieldDef {
    FieldDef::required(name, FieldKind::list(FieldKind::Text))
}

/// Cross-locale join key.
fn mapping_key() -> FieldDef {
    FieldDef::optional("mappingKey", FieldKind::Text)
}

/// Excludes the entry from the published set when true.
fn draft() -> FieldDef {
    FieldDef::optional("draft", FieldKind::Boolean)
}

/// Required list of objects.
fn object_list(name: &str, fields: Vec<FieldDef>) -> FieldDef {
    FieldDef::required(name, FieldKind::list(FieldKind::Object(fields)))
}

pub(super) fn blog() -> CollectionSchema {
    markdown(
        "blog",
        true,
        CmsExposure::Collection,
        vec![
            text("title"),
            text("description"),
            FieldDef::required("authors", FieldKind::list(FieldKind::reference("authors"))),
            FieldDef::required("pubDate", FieldKind::Date),
            FieldDef::optional("updatedDate", FieldKind::Date),
            FieldDef::optional("heroImage", FieldKind::Image),
            texts("categories"),
            texts("tags"),
            mapping_key(),
            draft(),
        ],
    )
}

pub(super) fn authors() -> CollectionSchema {
    markdown(
        "authors",
        false,
        CmsExposure::Collection,
        vec![
            text("name"),
            FieldDef::required("avatar", FieldKind::Image),
            text("about"),
            text("email"),
            text("authorLink"),
        ],
    )
}

pub(super) fn services() -> CollectionSchema {
    markdown(
        "services",
        true,
        CmsExposure::Collection,
        vec![
            text("title"),
            text("titleLong"),
            text("description"),
            text("icon"),
            FieldDef::required("image", FieldKind::Image),
            mapping_key(),
            FieldDef::optional("order", FieldKind::number()),
            draft(),
        ],
    )
}

pub(super) fn careers() -> CollectionSchema {
    markdown(
        "careers",
        true,
        CmsExposure::Collection,
        vec![
            text("title"),
            text("category"),
            text("location"),
            FieldDef::required("type", FieldKind::one_of(CAREER_TYPES)),
            text("description"),
            texts("requirements"),
            FieldDef::required("applicationUrl", FieldKind::Url),
            FieldDef::required("publishDate", FieldKind::Date),
            mapping_key(),
            FieldDef::with_default("draft", FieldKind::Boolean, FieldValue::Bool(false)),
        ],
    )
}

pub(super) fn projects() -> CollectionSchema {
    markdown(
        "projects",
        true,
        CmsExposure::Collection,
        vec![
            text("title"),
            text("description"),
            FieldDef::required("image", FieldKind::Image),
            texts("technologies"),
            FieldDef::optional("demoUrl", FieldKind::Url),
            FieldDef::optional("githubUrl", FieldKind::Url),
            FieldDef::required("completionDate", FieldKind::Date),
            texts("keyFeatures"),
            FieldDef::optional("order", FieldKind::number()),
            mapping_key(),
            draft(),
        ],
    )
}

pub(super) fn resume() -> CollectionSchema {
    CollectionSchema {
        name: "resume".to_string(),
        format: CollectionFormat::Data,
        pattern: DATA_PATTERN.to_string(),
        localized: true,
        cms: CmsExposure::Singleton,
        fields: vec![
            object_list(
                "diplomas",
                vec![text("title"), text("school"), FieldDef::required("year", FieldKind::number())],
            ),
            object_list(
                "certifications",
                vec![text("title"), FieldDef::required("year", FieldKind::number())],
            ),
            object_list(
                "experience",
                vec![
                    text("title"),
                    text("company"),
                    FieldDef::required("companyImage", FieldKind::Image),
                    text("dates"),
                    text("location"),
                    texts("responsibilities"),
                ],
            ),
            object_list(
                "hardSkills",
                vec![
                    text("skill"),
                    FieldDef::required("percentage", FieldKind::bounded(0.0, 100.0)),
                ],
            ),
            object_list("softSkills", vec![text("skill"), text("icon")]),
            object_list(
                "languages",
                vec![text("language"), FieldDef::required("level", FieldKind::bounded(1.0, 10.0))],
            ),
            object_list(
                "tools",
                vec![
                    text("name"),
                    text("category"),
                    FieldDef::required("image", FieldKind::Image),
                    FieldDef::required("link", FieldKind::Url),
                ],
            ),
            mapping_key(),
        ],
    }
}

pub(super) fn other_pages() -> CollectionSchema {
    markdown(
        "otherPages",
        true,
        CmsExposure::Collection,
        vec![text("title"), text("description"), mapping_key(), draft()],
    )
}

pub(super) fn code_toggles() -> CollectionSchema {
    markdown(
        "codeToggles",
        false,
        CmsExposure::Hidden,
        vec![
            text("language"),
            FieldDef::required("order", FieldKind::number()),
            FieldDef::optional("icon", FieldKind::Text),
            draft(),
        ],
    )
}
