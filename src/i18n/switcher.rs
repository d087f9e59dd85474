//! Language switcher links.

use super::{
    LocaleConfig,
    RouteTranslations,
};

/// Rewrites full site paths from one locale to another.
#[derive(Debug, Clone, Copy)]
pub struct LocaleSwitcher<'a> {
    /// Prefix rules for the site's locales.
    locales: &'a LocaleConfig,
    /// Route tables used for the path below the locale prefix.
    routes: &'a RouteTranslations,
}

impl<'a> LocaleSwitcher<'a> {
    #[must_use]
    pub const fn new(locales: &'a LocaleConfig, routes: &'a RouteTranslations) -> Self {
        Self { locales, routes }
    }

    /// Path of the page at `url` in locale `to`.
    ///
    /// The locale of `url` is read from its prefix. The site root maps to the
    /// root of `to`; any other path must match a route of its locale.
    #[must_use]
    pub fn switch_url(&self, url: &str, to: &str) -> Option<String> {
        self.switch_from(url, self.locales.locale_from_path(url), to)
    }

    /// Like [`Self::switch_url`], with the locale of `url` given by the caller.
    #[must_use]
    pub fn switch_from(&self, url: &str, from: &str, to: &str) -> Option<String> {
        if !self.locales.is_locale(to) {
            return None;
        }
        let path = self.locales.strip_locale(url);

        if path == "/" {
            return Some(self.locales.localize_path("/", to));
        }

        let translated = self.routes.translate_path(&path, from, to)?;
        Some(self.locales.localize_path(&translated, to))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::*;

    use super::*;

    #[fixture]
    fn routes() -> RouteTranslations {
        let table = |entries: &[(&str, &str)]| -> BTreeMap<String, String> {
            entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
        };
        let raw = BTreeMap::from([
            (
                "en".to_string(),
                table(&[("aboutKey", "about"), ("categoryKey2", "categories/*")]),
            ),
            (
                "fr".to_string(),
                table(&[("aboutKey", "a-propos"), ("categoryKey2", "categories")]),
            ),
        ]);
        RouteTranslations::parse(&raw).unwrap()
    }

    #[rstest]
    #[case::fr_to_en("/fr/a-propos", "en", Some("/about"))]
    #[case::en_to_fr("/about", "fr", Some("/fr/a-propos"))]
    #[case::wildcard("/categories/5", "fr", Some("/fr/categories/5"))]
    #[case::root_to_fr("/", "fr", Some("/fr/"))]
    #[case::fr_root_to_en("/fr/", "en", Some("/"))]
    #[case::unmatched("/pricing", "fr", None)]
    #[case::unknown_target("/about", "de", None)]
    fn test_switch_url(routes: RouteTranslations, #[case] url: &str, #[case] to: &str, #[case] expected: Option<&str>) {
        let locales = LocaleConfig::new(vec!["en".to_string(), "fr".to_string()], "en");
        let switcher = LocaleSwitcher::new(&locales, &routes);

        assert_eq!(switcher.switch_url(url, to).as_deref(), expected);
    }

    #[rstest]
    #[case::root("/", "fr", "en", Some("/"))]
    #[case::prefixed_root("/fr", "fr", "en", Some("/"))]
    #[case::route("/a-propos", "fr", "en", Some("/about"))]
    #[case::wrong_source("/a-propos", "en", "fr", None)]
    fn test_switch_from(
        routes: RouteTranslations,
        #[case] url: &str,
        #[case] from: &str,
        #[case] to: &str,
        #[case] expected: Option<&str>,
    ) {
        let locales = LocaleConfig::new(vec!["en".to_string(), "fr".to_string()], "en");
        let switcher = LocaleSwitcher::new(&locales, &routes);

        assert_eq!(switcher.switch_from(url, from, to).as_deref(), expected);
    }
}
