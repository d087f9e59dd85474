//! Locale-aware lookups.
//!
//! Text and route translation tables, locale prefixes in site paths, and the
//! join of content entries across locales through their `mappingKey`.

mod collections;
mod loader;
mod locale;
pub mod parity;
mod routes;
mod switcher;
mod text;

use std::path::PathBuf;

use thiserror::Error;

pub use self::collections::{
    CollectionJoiner,
    LocalizedCollections,
};
pub use self::loader::{
    TRANSLATION_DATA_FILE,
    TranslationData,
};
pub use self::locale::LocaleConfig;
pub use self::routes::{
    RouteMatch,
    RoutePattern,
    RouteTranslations,
};
pub use self::switcher::LocaleSwitcher;
pub use self::text::{
    TextTranslations,
    Translator,
    flatten_json,
};

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(
        "Invalid route pattern '{pattern}' for '{key}' in locale '{locale}': '*' is only allowed as the last segment"
    )]
    InvalidRoutePattern { locale: String, key: String, pattern: String },

    #[error("'{table}' has no entry for locale '{locale}'")]
    MissingLocale { table: &'static str, locale: String },
}
