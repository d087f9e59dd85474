//! Salsa inputs and raw file parsing.

pub mod content;
pub mod frontmatter;

pub use content::{
    ContentFile,
    ContentFormat,
};
pub use frontmatter::{
    Document,
    FrontMatterError,
    parse_document,
    parse_jsonc,
};
