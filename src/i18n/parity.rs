//! Key parity across locales.
//!
//! Every locale is expected to define the same text keys, route keys and
//! localized collection bases. Nothing enforces this at load time, so the
//! gaps are collected here and reported by the build.

use std::collections::BTreeSet;

use super::{
    LocalizedCollections,
    RouteTranslations,
    TextTranslations,
};

pub const TEXT_TABLE: &str = "textTranslations";
pub const ROUTE_TABLE: &str = "routeTranslations";
pub const COLLECTION_TABLE: &str = "localizedCollections";

/// A key defined for some locales but not for others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityGap {
    pub table: &'static str,
    pub key: String,
    pub missing_locales: Vec<String>,
}

impl ParityGap {
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "'{}' in {} is missing for locale(s): {}",
            self.key,
            self.table,
            self.missing_locales.join(", ")
        )
    }
}

/// Compares the key sets of every table across `locales`.
#[must_use]
pub fn check(
    locales: &[String],
    text: &TextTranslations,
    routes: &RouteTranslations,
    collections: &LocalizedCollections,
) -> Vec<ParityGap> {
    let mut gaps = Vec::new();

    collect_gaps(TEXT_TABLE, locales, |locale| text.keys(locale).collect(), &mut gaps);
    collect_gaps(ROUTE_TABLE, locales, |locale| routes.keys(locale).collect(), &mut gaps);

    for collection in collections.names() {
        let present: BTreeSet<&str> = collections.locales(collection).collect();
        let missing = missing(locales, |locale| present.contains(locale));
        if !missing.is_empty() {
            gaps.push(ParityGap {
                table: COLLECTION_TABLE,
                key: collection.to_string(),
                missing_locales: missing,
            });
        }
    }

    gaps
}

/// Adds a gap for every key of the union that some locale lacks.
fn collect_gaps<'a>(
    table: &'static str,
    locales: &[String],
    keys_of: impl Fn(&str) -> BTreeSet<&'a str>,
    gaps: &mut Vec<ParityGap>,
) {
    let per_locale: Vec<BTreeSet<&str>> = locales.iter().map(|locale| keys_of(locale)).collect();
    let union: BTreeSet<&str> = per_locale.iter().flatten().copied().collect();

    for key in union {
        let missing: Vec<String> = locales
            .iter()
            .zip(&per_locale)
            .filter(|(_, keys)| !keys.contains(key))
            .map(|(locale, _)| locale.clone())
            .collect();
        if !missing.is_empty() {
            gaps.push(ParityGap { table, key: key.to_string(), missing_locales: missing });
        }
    }
}

/// Locales for which `has` is false.
fn missing(locales: &[String], has: impl Fn(&str) -> bool) -> Vec<String> {
    locales.iter().filter(|locale| !has(locale)).cloned().collect()
}
