//! Locale prefixes in site paths.
//!
//! The default locale is served without a prefix (`/about`); every other
//! locale lives under `/<locale>` (`/fr/a-propos`).

use crate::config::SiteSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    locales: Vec<String>,
    default_locale: String,
}

impl LocaleConfig {
    #[must_use]
    pub fn new(locales: Vec<String>, default_locale: impl Into<String>) -> Self {
        Self { locales, default_locale: default_locale.into() }
    }

    #[must_use]
    pub fn from_settings(settings: &SiteSettings) -> Self {
        Self::new(settings.locales.clone(), settings.default_locale.clone())
    }

    #[must_use]
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    #[must_use]
    pub fn is_locale(&self, candidate: &str) -> bool {
        self.locales.iter().any(|locale| locale == candidate)
    }

    /// Locale of a site path: its first segment when that is a known locale,
    /// otherwise the default locale.
    #[must_use]
    pub fn locale_from_path<'a>(&'a self, path: &'a str) -> &'a str {
        path.trim_start_matches('/')
            .split('/')
            .next()
            .filter(|segment| self.is_locale(segment))
            .unwrap_or(self.default_locale.as_str())
    }

    /// Removes a leading locale segment. The result always starts with `/`.
    #[must_use]
    pub fn strip_locale(&self, path: &str) -> String {
        let trimmed = path.trim_start_matches('/');
        let rest = match trimmed.split_once('/') {
            Some((first, rest)) if self.is_locale(first) => rest,
            None if self.is_locale(trimmed) => "",
            _ => trimmed,
        };
        format!("/{rest}")
    }

    /// Prefixes `path` for `locale`. The default locale has no prefix and the
    /// root of any other locale is `/<locale>/`.
    #[must_use]
    pub fn localize_path(&self, path: &str, locale: &str) -> String {
        let path = path.trim_start_matches('/');
        if locale == self.default_locale {
            format!("/{path}")
        } else {
            format!("/{locale}/{path}")
        }
    }
}
