//! UI string tables.

use std::collections::{
    BTreeMap,
    BTreeSet,
};

use serde_json::Value;

/// Flattens a nested JSON object into a dot-separated key map.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use site_content::i18n::flatten_json;
///
/// let json = json!({
///     "blog": {
///         "back_to_all_posts": "Back to all posts",
///         "updated": "Updated"
///     }
/// });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("blog.updated"), Some(&"Updated".to_string()));
/// ```
#[must_use]
pub fn flatten_json(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    flatten_json_value(json, separator, prefix, &mut result);
    result
}

/// Recursive step of [`flatten_json`].
fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut BTreeMap<String, String>,
) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        Value::Null => {}
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}

/// Per-locale flat maps of translation key to display string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTranslations {
    /// Locale to flattened key map.
    tables: BTreeMap<String, BTreeMap<String, String>>,
}

impl TextTranslations {
    #[must_use]
    pub const fn new(tables: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self { tables }
    }

    /// Builds the tables from `{ locale: { nested keys } }` objects.
    #[must_use]
    pub fn from_nested(raw: &BTreeMap<String, Value>) -> Self {
        let tables = raw
            .iter()
            .map(|(locale, table)| (locale.clone(), flatten_json(table, ".", None)))
            .collect();
        Self { tables }
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// Keys defined in `locale`, empty for an unknown locale.
    pub fn keys(&self, locale: &str) -> impl Iterator<Item = &str> {
        self.tables.get(locale).into_iter().flat_map(BTreeMap::keys).map(String::as_str)
    }

    /// Union of the keys of every locale.
    #[must_use]
    pub fn all_keys(&self) -> BTreeSet<&str> {
        self.tables.values().flat_map(BTreeMap::keys).map(String::as_str).collect()
    }

    /// A missing locale or key is a miss; there is no implicit fallback.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.tables.get(locale)?.get(key).map(String::as_str)
    }

    /// Looks up `key` in `locale`, then in `fallback_locale`.
    #[must_use]
    pub fn get_or_fallback(&self, locale: &str, key: &str, fallback_locale: &str) -> Option<&str> {
        self.get(locale, key).or_else(|| self.get(fallback_locale, key))
    }

    /// Lookup bound to one locale.
    #[must_use]
    pub const fn translator<'a>(&'a self, locale: &'a str) -> Translator<'a> {
        Translator { translations: self, locale }
    }
}

/// Text lookups for a single locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    /// Tables the lookups read from.
    translations: &'a TextTranslations,
    /// Locale every lookup is made in.
    locale: &'a str,
}

impl<'a> Translator<'a> {
    #[must_use]
    pub const fn locale(&self) -> &'a str {
        self.locale
    }

    #[must_use]
    pub fn t(&self, key: &str) -> Option<&'a str> {
        self.translations.get(self.locale, key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    fn translations() -> TextTranslations {
        let raw: BTreeMap<String, Value> = serde_json::from_value(json!({
            "en": {
                "hero_text": "Everything you need for an amazing website.",
                "blog": { "back_to_all_posts": "Back to all posts", "updated": "Updated" }
            },
            "fr": {
                "hero_text": "Tout ce dont vous avez besoin pour un site Web incroyable.",
                "blog": { "back_to_all_posts": "Retour à tous les articles" }
            }
        }))
        .unwrap();
        TextTranslations::from_nested(&raw)
    }

    #[googletest::test]
    fn test_flatten_json_nested() {
        let json = json!({
            "common": { "hello": "Hello", "goodbye": "Goodbye" },
            "errors": { "notFound": "Not found" }
        });

        let result = flatten_json(&json, ".", None);

        expect_that!(result.get("common.hello"), some(eq(&"Hello".to_string())));
        expect_that!(result.get("common.goodbye"), some(eq(&"Goodbye".to_string())));
        expect_that!(result.get("errors.notFound"), some(eq(&"Not found".to_string())));
        expect_that!(result.len(), eq(3));
    }

    #[googletest::test]
    fn test_flatten_json_arrays_and_scalars() {
        let json = json!({ "items": ["a", "b"], "count": 3, "missing": null });

        let result = flatten_json(&json, ".", None);

        expect_that!(result.get("items[0]"), some(eq(&"a".to_string())));
        expect_that!(result.get("items[1]"), some(eq(&"b".to_string())));
        expect_that!(result.get("count"), some(eq(&"3".to_string())));
        expect_that!(result.get("missing"), none());
    }

    #[googletest::test]
    fn test_get() {
        let translations = translations();

        expect_that!(translations.get("en", "blog.updated"), some(eq("Updated")));
        expect_that!(
            translations.get("fr", "blog.back_to_all_posts"),
            some(eq("Retour à tous les articles"))
        );
        expect_that!(translations.get("fr", "blog.updated"), none());
        expect_that!(translations.get("de", "hero_text"), none());
    }

    #[googletest::test]
    fn test_get_or_fallback() {
        let translations = translations();

        expect_that!(translations.get_or_fallback("fr", "blog.updated", "en"), some(eq("Updated")));
        expect_that!(translations.get_or_fallback("fr", "nope", "en"), none());
    }

    #[googletest::test]
    fn test_shared_keys_resolve_in_every_locale() {
        let translations = translations();

        for key in ["hero_text", "blog.back_to_all_posts"] {
            for locale in ["en", "fr"] {
                expect_that!(translations.get(locale, key), some(not(eq(""))));
            }
        }
    }

    #[googletest::test]
    fn test_translator() {
        let translations = translations();
        let t = translations.translator("fr");

        expect_that!(t.locale(), eq("fr"));
        expect_that!(t.t("blog.back_to_all_posts"), some(eq("Retour à tous les articles")));
        expect_that!(t.t("blog.updated"), none());
    }

    #[googletest::test]
    fn test_all_keys() {
        let keys: Vec<String> = translations().all_keys().into_iter().map(String::from).collect();

        expect_that!(
            keys,
            elements_are![eq("blog.back_to_all_posts"), eq("blog.updated"), eq("hero_text")]
        );
    }
}
