//! Route translation between locales.
//!
//! Every locale maps logical route keys to a path pattern. A pattern is a
//! path without leading or trailing slash that may end in a `*` segment,
//! which captures the rest of the path:
//!
//! ```text
//! en: categoryKey2 = "categories/*"     fr: categoryKey2 = "categories"
//! /categories/5 (en)  ->  /categories/5 (fr)
//! ```

use std::collections::BTreeMap;

use super::I18nError;

/// A route pattern with an optional trailing wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    /// Fixed part of the pattern, without surrounding slashes.
    prefix: String,
    /// Whether a `*` segment follows the prefix.
    wildcard: bool,
}

/// How a path matched a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch<'p> {
    Exact,
    /// Wildcard match with the captured suffix.
    Wildcard(&'p str),
}

impl RoutePattern {
    /// Parses a pattern. Returns `None` when `*` appears anywhere but as
    /// the last segment.
    #[must_use]
    pub fn parse(pattern: &str) -> Option<Self> {
        let trimmed = pattern.trim_matches('/');
        let (prefix, wildcard) = if trimmed == "*" {
            ("", true)
        } else if let Some(prefix) = trimmed.strip_suffix("/*") {
            (prefix, true)
        } else {
            (trimmed, false)
        };

        if prefix.contains('*') {
            return None;
        }
        Some(Self { prefix: prefix.to_string(), wildcard })
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Matches a normalised path (no leading or trailing slash).
    ///
    /// A wildcard pattern requires a non-empty suffix, so `categories/*`
    /// does not match `categories`.
    #[must_use]
    pub fn matches<'p>(&self, path: &'p str) -> Option<RouteMatch<'p>> {
        if !self.wildcard {
            return (path == self.prefix).then_some(RouteMatch::Exact);
        }

        let suffix = if self.prefix.is_empty() {
            path
        } else {
            path.strip_prefix(self.prefix.as_str())?.strip_prefix('/')?
        };
        (!suffix.is_empty()).then_some(RouteMatch::Wildcard(suffix))
    }

    /// Builds the site path for this pattern, re-attaching a captured suffix.
    #[must_use]
    pub fn render(&self, route_match: RouteMatch<'_>) -> String {
        let suffix = match route_match {
            RouteMatch::Exact => "",
            RouteMatch::Wildcard(suffix) => suffix,
        };
        let segments: Vec<&str> =
            [self.prefix.as_str(), suffix].into_iter().filter(|s| !s.is_empty()).collect();
        format!("/{}", segments.join("/"))
    }
}

/// Per-locale route tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTranslations {
    /// Locale to route key to pattern.
    tables: BTreeMap<String, BTreeMap<String, RoutePattern>>,
}

impl RouteTranslations {
    /// Parses raw `{ locale: { routeKey: pattern } }` tables.
    ///
    /// # Errors
    /// Returns [`I18nError::InvalidRoutePattern`] for a pattern with a
    /// non-trailing `*`.
    pub fn parse(raw: &BTreeMap<String, BTreeMap<String, String>>) -> Result<Self, I18nError> {
        let mut tables = BTreeMap::new();
        for (locale, routes) in raw {
            let mut table = BTreeMap::new();
            for (key, pattern) in routes {
                let parsed =
                    RoutePattern::parse(pattern).ok_or_else(|| I18nError::InvalidRoutePattern {
                        locale: locale.clone(),
                        key: key.clone(),
                        pattern: pattern.clone(),
                    })?;
                table.insert(key.clone(), parsed);
            }
            tables.insert(locale.clone(), table);
        }
        Ok(Self { tables })
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// Route keys defined in `locale`.
    pub fn keys(&self, locale: &str) -> impl Iterator<Item = &str> {
        self.tables.get(locale).into_iter().flat_map(BTreeMap::keys).map(String::as_str)
    }

    #[must_use]
    pub fn pattern(&self, locale: &str, route_key: &str) -> Option<&RoutePattern> {
        self.tables.get(locale)?.get(route_key)
    }

    /// Finds the route key whose pattern in `locale` matches `path`.
    ///
    /// Exact patterns win over wildcards; among wildcards the longest prefix
    /// wins and ties go to the first key in order.
    #[must_use]
    pub fn find_route<'a, 'p>(
        &'a self,
        locale: &str,
        path: &'p str,
    ) -> Option<(&'a str, RouteMatch<'p>)> {
        let table = self.tables.get(locale)?;
        let path = path.trim_matches('/');

        let exact = table
            .iter()
            .find(|(_, pattern)| pattern.matches(path) == Some(RouteMatch::Exact))
            .map(|(key, _)| (key.as_str(), RouteMatch::Exact));
        if exact.is_some() {
            return exact;
        }

        let mut best: Option<(&'a str, usize, RouteMatch<'p>)> = None;
        for (key, pattern) in table {
            let Some(found) = pattern.matches(path) else {
                continue;
            };
            let len = pattern.prefix.len();
            if best.is_none_or(|(_, best_len, _)| len > best_len) {
                best = Some((key.as_str(), len, found));
            }
        }
        best.map(|(key, _, found)| (key, found))
    }

    /// Translates a path (without locale prefix) from one locale's routes to
    /// another's. Returns `None` when no route matches or the target locale
    /// lacks the matched key.
    #[must_use]
    pub fn translate_path(&self, path: &str, from: &str, to: &str) -> Option<String> {
        let (key, found) = self.find_route(from, path)?;
        let target = self.pattern(to, key)?;
        Some(target.render(found))
    }
}
