//! Loading of `translationData.json`.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use serde::Deserialize;
use serde_json::Value;

use super::{
    I18nError,
    LocalizedCollections,
    RouteTranslations,
    TextTranslations,
};
use crate::data::SiteSettingsProps;
use crate::input::parse_jsonc;

pub const TRANSLATION_DATA_FILE: &str = "translationData.json";

/// File layout before key flattening and pattern parsing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTranslationData {
    /// Nested text tables per locale.
    #[serde(default)]
    text_translations: BTreeMap<String, Value>,
    /// Route patterns per locale.
    #[serde(default)]
    route_translations: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    localized_collections: LocalizedCollections,
    site_settings: Option<SiteSettingsProps>,
}

/// Text, route and localized collection tables of the site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationData {
    pub text: TextTranslations,
    pub routes: RouteTranslations,
    pub localized_collections: LocalizedCollections,
    pub site_settings: SiteSettingsProps,
}

impl TranslationData {
    /// Reads `<config_dir>/translationData.json`.
    ///
    /// # Errors
    /// Fails when the file cannot be read or parsed, a route pattern is
    /// invalid, or a configured locale has no text or route table.
    pub fn load(config_dir: &Path, locales: &[String]) -> Result<Self, I18nError> {
        let path = config_dir.join(TRANSLATION_DATA_FILE);
        tracing::debug!(path = %path.display(), "Loading translation data");

        let text = std::fs::read_to_string(&path)
            .map_err(|source| I18nError::Io { path: path.clone(), source })?;
        Self::parse(&text, locales).map_err(|err| match err {
            I18nError::Parse { message, .. } => I18nError::Parse { path, message },
            other => other,
        })
    }

    /// Parses the file contents. Parse errors carry an empty path.
    ///
    /// # Errors
    /// See [`TranslationData::load`].
    pub fn parse(text: &str, locales: &[String]) -> Result<Self, I18nError> {
        let parse_error = |message: String| I18nError::Parse { path: PathBuf::new(), message };

        let value = parse_jsonc(text).map_err(parse_error)?;
        let raw: RawTranslationData =
            serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))?;

        for locale in locales {
            if !raw.text_translations.contains_key(locale) {
                return Err(I18nError::MissingLocale {
                    table: super::parity::TEXT_TABLE,
                    locale: locale.clone(),
                });
            }
            if !raw.route_translations.contains_key(locale) {
                return Err(I18nError::MissingLocale {
                    table: super::parity::ROUTE_TABLE,
                    locale: locale.clone(),
                });
            }
        }

        Ok(Self {
            text: TextTranslations::from_nested(&raw.text_translations),
            routes: RouteTranslations::parse(&raw.route_translations)?,
            localized_collections: raw.localized_collections,
            site_settings: raw.site_settings.unwrap_or_default(),
        })
    }
}
