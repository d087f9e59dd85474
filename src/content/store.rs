//! In-memory set of validated entries.

use std::collections::BTreeMap;

use super::ContentEntry;
use crate::schema::EntryRef;

/// A reference from one entry to an entry that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Path of the referencing file, relative to the workspace root.
    pub path: String,
    pub field_path: String,
    pub target: EntryRef,
}

impl DanglingReference {
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "references missing entry '{}' in collection '{}'",
            self.target.id, self.target.collection
        )
    }
}

/// Validated entries grouped by collection and keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentStore {
    locales: Vec<String>,
    collections: BTreeMap<String, BTreeMap<String, ContentEntry>>,
}

impl ContentStore {
    #[must_use]
    pub fn new(locales: Vec<String>) -> Self {
        Self { locales, collections: BTreeMap::new() }
    }

    #[must_use]
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Adds an entry, returning the entry it replaced if the id was taken.
    pub fn insert(&mut self, entry: ContentEntry) -> Option<ContentEntry> {
        self.collections
            .entry(entry.collection.clone())
            .or_default()
            .insert(entry.id.clone(), entry)
    }

    /// Removes the entry loaded from `path`.
    pub fn remove_path(&mut self, path: &str) -> Option<ContentEntry> {
        for entries in self.collections.values_mut() {
            let id = entries.iter().find(|(_, entry)| entry.path == path).map(|(id, _)| id.clone());
            if let Some(id) = id {
                return entries.remove(&id);
            }
        }
        None
    }

    #[must_use]
    pub fn get(&self, collection: &str, id: &str) -> Option<&ContentEntry> {
        self.collections.get(collection)?.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every valid entry of a collection, drafts included.
    pub fn entries(&self, collection: &str) -> impl Iterator<Item = &ContentEntry> {
        self.collections.get(collection).into_iter().flat_map(BTreeMap::values)
    }

    /// Entries that are not drafts.
    pub fn published(&self, collection: &str) -> impl Iterator<Item = &ContentEntry> {
        self.entries(collection).filter(|entry| !entry.is_draft())
    }

    /// Published entries whose locale segment is `locale`.
    pub fn published_in_locale<'a>(
        &'a self,
        collection: &str,
        locale: &str,
    ) -> impl Iterator<Item = &'a ContentEntry> {
        self.published(collection)
            .filter(move |entry| entry.locale(&self.locales) == Some(locale))
    }

    /// Published entry in `target_locale` sharing `mapping_key`.
    #[must_use]
    pub fn counterpart(
        &self,
        collection: &str,
        mapping_key: &str,
        target_locale: &str,
    ) -> Option<&ContentEntry> {
        self.published(collection).find(|entry| {
            entry.locale(&self.locales) == Some(target_locale)
                && entry.mapping_key() == Some(mapping_key)
        })
    }

    /// Counterpart of `entry` in `target_locale`; entries without a mapping key have none.
    #[must_use]
    pub fn counterpart_of(&self, entry: &ContentEntry, target_locale: &str) -> Option<&ContentEntry> {
        let mapping_key = entry.mapping_key()?;
        self.counterpart(&entry.collection, mapping_key, target_locale)
    }

    /// References whose target entry is not in the store.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for entry in self.collections.values().flat_map(BTreeMap::values) {
            for (field_path, target) in entry.references() {
                if self.get(&target.collection, &target.id).is_none() {
                    dangling.push(DanglingReference {
                        path: entry.path.clone(),
                        field_path,
                        target: target.clone(),
                    });
                }
            }
        }
        dangling
    }

    /// Drops every entry holding a dangling reference and returns the references.
    ///
    /// Repeats until the store is closed under references, so an entry that
    /// only pointed at a pruned entry is dropped as well.
    pub fn prune_dangling_references(&mut self) -> Vec<DanglingReference> {
        let mut pruned = Vec::new();
        loop {
            let dangling = self.dangling_references();
            if dangling.is_empty() {
                return pruned;
            }
            for reference in &dangling {
                if self.remove_path(&reference.path).is_some() {
                    tracing::debug!(path = %reference.path, "Removed entry with dangling reference");
                }
            }
            pruned.extend(dangling);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::content::content_entry;
    use crate::db::ContentDatabaseImpl;
    use crate::schema::FieldValue;
    use crate::test_utils::{
        blog_markdown,
        create_content_file,
        locales,
    };

    const AUTHOR: &str = "---\nname: Jane\navatar: ./jane.jpg\nabout: Writer\nemail: jane@example.com\nauthorLink: https://example.com\n---\n";

    fn entry(db: &ContentDatabaseImpl, collection: &str, entry_path: &str, text: &str) -> ContentEntry {
        content_entry(db, create_content_file(db, collection, entry_path, text)).unwrap()
    }

    #[fixture]
    fn store() -> ContentStore {
        let db = ContentDatabaseImpl::default();
        let mut store = ContentStore::new(locales());
        store.insert(entry(&db, "authors", "main-author.md", AUTHOR));
        store.insert(entry(
            &db,
            "blog",
            "en/intro-post.md",
            &blog_markdown("Intro", "intro-post", false),
        ));
        store.insert(entry(
            &db,
            "blog",
            "fr/article-intro.md",
            &blog_markdown("Introduction", "intro-post", false),
        ));
        store.insert(entry(
            &db,
            "blog",
            "en/upcoming.md",
            &blog_markdown("Upcoming", "upcoming", true),
        ));
        store.insert(entry(
            &db,
            "blog",
            "fr/a-venir.md",
            &blog_markdown("A venir", "upcoming", false),
        ));
        store
    }

    fn ids<'a>(entries: impl Iterator<Item = &'a ContentEntry>) -> Vec<String> {
        entries.map(|entry| entry.id.clone()).collect()
    }

    #[rstest]
    fn test_counterpart_across_locales(store: ContentStore) {
        let fr = store.counterpart("blog", "intro-post", "fr").unwrap();

        assert_eq!(fr.id, "fr/article-intro");
        assert_eq!(fr.mapping_key(), Some("intro-post"));
    }

    #[rstest]
    fn test_counterpart_of_entry(store: ContentStore) {
        let en = store.get("blog", "en/intro-post").unwrap();

        let fr = store.counterpart_of(en, "fr").map(|entry| entry.id.as_str());

        assert_eq!(fr, Some("fr/article-intro"));
    }

    #[rstest]
    fn test_counterpart_missing(store: ContentStore) {
        assert!(store.counterpart("blog", "unknown-key", "fr").is_none());
        assert!(store.counterpart("services", "intro-post", "fr").is_none());
        // drafts are not published, so they have no counterpart either way
        assert!(store.counterpart("blog", "upcoming", "en").is_none());
    }

    #[rstest]
    fn test_counterpart_without_mapping_key(store: ContentStore) {
        let author = store.get("authors", "main-author").unwrap();

        assert!(store.counterpart_of(author, "fr").is_none());
    }

    #[rstest]
    fn test_published_excludes_drafts(store: ContentStore) {
        assert_that!(
            ids(store.entries("blog")),
            unordered_elements_are![
                eq("en/intro-post"),
                eq("en/upcoming"),
                eq("fr/article-intro"),
                eq("fr/a-venir")
            ]
        );
        assert_that!(
            ids(store.published("blog")),
            unordered_elements_are![eq("en/intro-post"), eq("fr/article-intro"), eq("fr/a-venir")]
        );
        assert_that!(ids(store.published_in_locale("blog", "en")), elements_are![eq("en/intro-post")]);
    }

    #[rstest]
    fn test_toggling_draft_republishes() {
        let db = ContentDatabaseImpl::default();
        let mut store = ContentStore::new(locales());
        store.insert(entry(&db, "blog", "en/post.md", &blog_markdown("Post", "post", true)));
        assert_eq!(store.published("blog").count(), 0);

        let replaced =
            store.insert(entry(&db, "blog", "en/post.md", &blog_markdown("Post", "post", false)));

        assert!(replaced.is_some_and(|old| old.is_draft()));
        assert_eq!(store.published("blog").count(), 1);
    }

    #[rstest]
    fn test_dangling_references() {
        let db = ContentDatabaseImpl::default();
        let mut store = ContentStore::new(locales());
        store.insert(entry(&db, "blog", "en/post.md", &blog_markdown("Post", "post", false)));

        let dangling = store.prune_dangling_references();

        assert_eq!(
            dangling,
            vec![DanglingReference {
                path: "src/data/blog/en/post.md".to_string(),
                field_path: "authors[0]".to_string(),
                target: EntryRef {
                    collection: "authors".to_string(),
                    id: "main-author".to_string()
                },
            }]
        );
        assert!(store.is_empty());
    }

    fn linked(collection: &str, id: &str, target: (&str, &str)) -> ContentEntry {
        let reference = EntryRef { collection: target.0.to_string(), id: target.1.to_string() };
        ContentEntry {
            collection: collection.to_string(),
            id: id.to_string(),
            path: format!("src/data/{collection}/{id}.md"),
            data: [("link".to_string(), FieldValue::Reference(reference))].into_iter().collect(),
            body: None,
        }
    }

    #[rstest]
    fn test_prune_follows_chains() {
        let mut store = ContentStore::new(locales());
        store.insert(linked("pages", "a", ("pages", "b")));
        store.insert(linked("pages", "b", ("pages", "ghost")));
        store.insert(linked("pages", "c", ("pages", "c")));

        let dangling = store.prune_dangling_references();

        let paths: Vec<String> = dangling.iter().map(|d| d.path.clone()).collect();
        assert_that!(paths, elements_are![eq("src/data/pages/b.md"), eq("src/data/pages/a.md")]);
        assert!(store.get("pages", "a").is_none());
        assert!(store.get("pages", "c").is_some());
        assert!(store.dangling_references().is_empty());
    }

    #[rstest]
    fn test_counterpart_outlives_locale_argument(store: ContentStore) {
        let found = {
            let target = String::from("fr");
            store.counterpart("blog", "intro-post", &target)
        };

        assert_eq!(found.map(|entry| entry.id.as_str()), Some("fr/article-intro"));

        let published = {
            let target = String::from("en");
            ids(store.published_in_locale("blog", &target))
        };
        assert_that!(published, elements_are![eq("en/intro-post")]);
    }

    #[rstest]
    fn test_resolved_references(store: ContentStore) {
        assert!(store.dangling_references().is_empty());
        assert_eq!(store.len(), 5);
    }
}
