//! Content collections that take part in localization.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};

use super::LocaleConfig;
use crate::content::{
    ContentEntry,
    ContentStore,
};

/// Collection name to per-locale route base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LocalizedCollections(BTreeMap<String, BTreeMap<String, String>>);

impl LocalizedCollections {
    #[must_use]
    pub const fn new(collections: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self(collections)
    }

    #[must_use]
    pub fn contains(&self, collection: &str) -> bool {
        self.0.contains_key(collection)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Locales with a route base for `collection`.
    pub fn locales(&self, collection: &str) -> impl Iterator<Item = &str> {
        self.0.get(collection).into_iter().flat_map(BTreeMap::keys).map(String::as_str)
    }

    #[must_use]
    pub fn route_base(&self, collection: &str, locale: &str) -> Option<&str> {
        self.0.get(collection)?.get(locale).map(|base| base.trim_matches('/'))
    }
}

/// Joins entries of localized collections across locales.
#[derive(Debug, Clone, Copy)]
pub struct CollectionJoiner<'a> {
    /// Entries to search.
    store: &'a ContentStore,
    /// Collections allowed to join, with their route bases.
    collections: &'a LocalizedCollections,
    /// Locale prefix rules for generated paths.
    locales: &'a LocaleConfig,
}

impl<'a> CollectionJoiner<'a> {
    #[must_use]
    pub const fn new(
        store: &'a ContentStore,
        collections: &'a LocalizedCollections,
        locales: &'a LocaleConfig,
    ) -> Self {
        Self { store, collections, locales }
    }

    /// Published entry of `collection` in `target_locale` with `mapping_key`.
    /// Collections not declared as localized never have counterparts.
    #[must_use]
    pub fn counterpart(
        &self,
        collection: &str,
        mapping_key: &str,
        target_locale: &str,
    ) -> Option<&'a ContentEntry> {
        if !self.collections.contains(collection) {
            return None;
        }
        self.store.counterpart(collection, mapping_key, target_locale)
    }

    #[must_use]
    pub fn counterpart_of(&self, entry: &ContentEntry, target_locale: &str) -> Option<&'a ContentEntry> {
        let mapping_key = entry.mapping_key()?;
        self.counterpart(&entry.collection, mapping_key, target_locale)
    }

    /// Site path of an entry: `/<route base>/<slug>`, prefixed for its locale.
    #[must_use]
    pub fn entry_path(&self, entry: &ContentEntry) -> Option<String> {
        let locale = entry.locale(self.locales.locales())?;
        let base = self.collections.route_base(&entry.collection, locale)?;
        let slug = entry.slug(self.locales.locales());
        let path = [base, slug].into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join("/");
        Some(self.locales.localize_path(&path, locale))
    }

    /// Localized path of the counterpart of `entry` in `target_locale`.
    #[must_use]
    pub fn alternate_path(&self, entry: &ContentEntry, target_locale: &str) -> Option<String> {
        self.entry_path(self.counterpart_of(entry, target_locale)?)
    }

    /// Paths of `entry` in every locale where it is available, itself included.
    #[must_use]
    pub fn alternates(&self, entry: &ContentEntry) -> Vec<(String, String)> {
        self.locales
            .locales()
            .iter()
            .filter_map(|locale| {
                let path = if entry.locale(self.locales.locales()) == Some(locale.as_str()) {
                    self.entry_path(entry)
                } else {
                    self.alternate_path(entry, locale)
                };
                path.map(|path| (locale.clone(), path))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::content::content_entry;
    use crate::db::ContentDatabaseImpl;
    use crate::test_utils::{
        blog_markdown,
        create_content_file,
        locales,
    };

    const SERVICE: &str = "---\ntitle: Pediatrics\ntitleLong: Pediatric care\ndescription: Care\nicon: tabler/heart\nimage: ./pediatrics.jpg\nmappingKey: pediatrics\n---\n";

    fn collections() -> LocalizedCollections {
        serde_json::from_value(json!({
            "blog": { "en": "blog", "fr": "/articles/" }
        }))
        .unwrap()
    }

    fn store() -> ContentStore {
        let db = ContentDatabaseImpl::default();
        let mut store = ContentStore::new(locales());
        for (collection, path, text) in [
            ("blog", "en/intro-post.md", blog_markdown("Intro", "intro-post", false)),
            ("blog", "fr/article-intro.md", blog_markdown("Introduction", "intro-post", false)),
            ("blog", "en/english-only.md", blog_markdown("Only", "english-only", false)),
            ("services", "en/pediatrics.md", SERVICE.to_string()),
            ("services", "fr/pediatrie.md", SERVICE.to_string()),
        ] {
            let file = create_content_file(&db, collection, path, &text);
            store.insert(content_entry(&db, file).unwrap());
        }
        store
    }

    #[googletest::test]
    fn test_route_base() {
        let collections = collections();

        expect_that!(collections.route_base("blog", "fr"), some(eq("articles")));
        expect_that!(collections.route_base("blog", "de"), none());
        expect_that!(collections.route_base("services", "en"), none());
        expect_that!(collections.contains("blog"), eq(true));
    }

    #[googletest::test]
    fn test_counterpart_and_paths() {
        let store = store();
        let collections = collections();
        let locales = LocaleConfig::new(locales(), "en");
        let joiner = CollectionJoiner::new(&store, &collections, &locales);
        let en = store.get("blog", "en/intro-post").unwrap();

        expect_that!(
            joiner.counterpart("blog", "intro-post", "fr").map(|e| e.id.as_str()),
            some(eq("fr/article-intro"))
        );
        expect_that!(joiner.entry_path(en), some(eq("/blog/intro-post")));
        expect_that!(joiner.alternate_path(en, "fr"), some(eq("/fr/articles/article-intro")));
        expect_that!(
            joiner.alternates(en),
            elements_are![
                eq(&("en".to_string(), "/blog/intro-post".to_string())),
                eq(&("fr".to_string(), "/fr/articles/article-intro".to_string()))
            ]
        );
    }

    #[googletest::test]
    fn test_no_counterpart() {
        let store = store();
        let collections = collections();
        let locales = LocaleConfig::new(locales(), "en");
        let joiner = CollectionJoiner::new(&store, &collections, &locales);
        let english_only = store.get("blog", "en/english-only").unwrap();
        let service = store.get("services", "en/pediatrics").unwrap();

        expect_that!(joiner.alternate_path(english_only, "fr"), none());
        expect_that!(joiner.alternates(english_only).len(), eq(1));
        // services share a mapping key but are not a localized collection here
        expect_that!(joiner.counterpart_of(service, "fr"), none());
        expect_that!(store.counterpart_of(service, "fr").is_some(), eq(true));
    }
}
