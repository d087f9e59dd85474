//! Content file input definitions.

use std::path::Path;

/// Salsa input holding one content file discovered under a collection.
#[salsa::input(debug)]
pub struct ContentFile {
    /// Collection the file belongs to (e.g. "blog").
    #[returns(ref)]
    pub collection: String,

    /// Path relative to the workspace root, used in reports.
    #[returns(ref)]
    pub path: String,

    /// Path relative to the collection base (e.g. "en/intro-post.md").
    #[returns(ref)]
    pub entry_path: String,

    #[returns(ref)]
    pub text: String,

    pub format: ContentFormat,
}

/// On-disk format of a content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentFormat {
    Markdown,
    Mdx,
    Json,
    Jsonc,
}

impl ContentFormat {
    /// Infers the format from the file extension.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("md") => Some(Self::Markdown),
            Some("mdx") => Some(Self::Mdx),
            Some("json") => Some(Self::Json),
            Some("jsonc") => Some(Self::Jsonc),
            _ => None,
        }
    }

    /// Markdown-like formats carry YAML front matter and a body.
    #[must_use]
    pub const fn has_front_matter(self) -> bool {
        matches!(self, Self::Markdown | Self::Mdx)
    }
}
