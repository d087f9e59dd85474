//! Loading of the per-locale data tables.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{
    FaqItem,
    NavItem,
    SiteData,
    TestimonialItem,
};
use crate::input::parse_jsonc;

/// Table names; each is read from `<configDir>/<locale>/<name>.json`.
pub const DATA_TABLES: [&str; 4] = ["siteData", "navData", "testimonialData", "faqData"];

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Locale '{locale}' has no {table} table (expected {})", path.display())]
    MissingTable { locale: String, table: &'static str, path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Every data table of one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleData {
    pub site_data: SiteData,
    pub nav_data: Vec<NavItem>,
    pub testimonial_data: Vec<TestimonialItem>,
    pub faq_data: Vec<FaqItem>,
}

/// Data tables keyed by locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTranslations {
    locales: BTreeMap<String, LocaleData>,
}

impl DataTranslations {
    /// Loads every table for every locale.
    ///
    /// # Errors
    /// Fails on the first table that is missing, unreadable or malformed.
    pub fn load(config_dir: &Path, locales: &[String]) -> Result<Self, DataError> {
        let mut loaded = BTreeMap::new();
        for locale in locales {
            let dir = config_dir.join(locale);
            tracing::debug!(locale = %locale, dir = %dir.display(), "Loading data tables");

            let [site, nav, testimonials, faq] = DATA_TABLES;
            let data = LocaleData {
                site_data: read_table(&dir, locale, site)?,
                nav_data: read_table(&dir, locale, nav)?,
                testimonial_data: read_table(&dir, locale, testimonials)?,
                faq_data: read_table(&dir, locale, faq)?,
            };
            loaded.insert(locale.clone(), data);
        }
        Ok(Self { locales: loaded })
    }

    /// A locale that was not loaded is a miss.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&LocaleData> {
        self.locales.get(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }
}

/// Reads and deserializes `<dir>/<table>.json`.
fn read_table<T: DeserializeOwned>(
    dir: &Path,
    locale: &str,
    table: &'static str,
) -> Result<T, DataError> {
    let path = dir.join(format!("{table}.json"));
    if !path.is_file() {
        return Err(DataError::MissingTable { locale: locale.to_string(), table, path });
    }

    let text = std::fs::read_to_string(&path)
        .map_err(|source| DataError::Io { path: path.clone(), source })?;
    let value =
        parse_jsonc(&text).map_err(|message| DataError::Parse { path: path.clone(), message })?;
    serde_json::from_value(value).map_err(|e| DataError::Parse { path, message: e.to_string() })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::path::Path;

    use googletest::prelude::*;

    use super::*;
    use crate::test_utils::{
        locales,
        write_file,
    };

    const SITE_DATA: &str = r#"{
        "name": "Starter",
        // meta fields
        "title": "Starter",
        "description": "An empty project",
        "author": { "name": "Cosmic Themes", "email": "creator@example.com", "twitter": "Cosmic_Themes" },
        "defaultImage": { "src": "/images/logo.jpg", "alt": "Logo" },
    }"#;

    fn write_locale(root: &Path, locale: &str, nav: &str) {
        write_file(root, &format!("{locale}/siteData.json"), SITE_DATA);
        write_file(root, &format!("{locale}/navData.json"), nav);
        write_file(
            root,
            &format!("{locale}/testimonialData.json"),
            r#"[{ "avatar": "/images/geoffrey.webp", "name": "Geoffrey", "title": "Patient Since 2020", "testimonial": "Great" }]"#,
        );
        write_file(root, &format!("{locale}/faqData.json"), r#"[{ "question": "Q?", "answer": "A." }]"#);
    }

    #[googletest::test]
    fn test_load_all_locales() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", r#"[{ "text": "About", "link": "/about" }]"#);
        write_locale(dir.path(), "fr", r#"[{ "text": "À propos", "link": "/fr/a-propos" }]"#);

        let data = DataTranslations::load(dir.path(), &locales()).unwrap();

        let fr = data.get("fr").unwrap();
        expect_that!(fr.nav_data.first().map(NavItem::text), some(eq("À propos")));
        expect_that!(fr.site_data.name, eq("Starter"));
        expect_that!(fr.testimonial_data.len(), eq(1));
        expect_that!(fr.faq_data.first().map(|faq| faq.answer.as_str()), some(eq("A.")));
        expect_that!(data.get("de"), none());
    }

    #[googletest::test]
    fn test_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "[]");
        write_file(dir.path(), "fr/siteData.json", SITE_DATA);

        let result = DataTranslations::load(dir.path(), &locales());

        let Err(DataError::MissingTable { locale, table, .. }) = &result else {
            panic!("expected a missing table error, got {result:?}");
        };
        expect_that!(locale, eq("fr"));
        expect_that!(*table, eq("navData"));
    }

    #[googletest::test]
    fn test_invalid_nav_item() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", r#"[{ "text": "A", "link": "/a", "dropdown": [] }]"#);

        let result = DataTranslations::load(dir.path(), &["en".to_string()]);

        let Err(DataError::Parse { path, .. }) = &result else {
            panic!("expected a parse error, got {result:?}");
        };
        expect_that!(path.ends_with("en/navData.json"), eq(true));
    }
}
