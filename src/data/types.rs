use serde::{
    Deserialize,
    Serialize,
};

/// Site metadata used for page titles and meta tags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteData {
    pub name: String,
    pub title: String,
    pub description: String,
    /// Used for blog posts.
    pub author: Author,
    /// Fallback image for pages without one.
    pub default_image: DefaultImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Author {
    pub name: String,
    pub email: String,
    /// Handle used for Twitter cards.
    pub twitter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DefaultImage {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NavLink {
    pub text: String,
    pub link: String,
    /// Opens the link in a new tab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_tab: Option<bool>,
    /// Icon name such as `tabler/star`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One level of dropdown. Its items are plain links.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NavDropdown {
    pub text: String,
    pub dropdown: Vec<NavLink>,
}

/// A top-level navigation item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NavItem {
    Link(NavLink),
    Dropdown(NavDropdown),
}

impl NavItem {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Link(link) => &link.text,
            Self::Dropdown(dropdown) => &dropdown.text,
        }
    }

    /// Every link of the item, dropdown entries included.
    pub fn links(&self) -> impl Iterator<Item = &NavLink> {
        let (single, many) = match self {
            Self::Link(link) => (Some(link), &[] as &[NavLink]),
            Self::Dropdown(dropdown) => (None, dropdown.dropdown.as_slice()),
        };
        single.into_iter().chain(many)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FaqItem {
    pub question: String,
    /// Shown after the item is expanded.
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestimonialItem {
    /// Path of the avatar image.
    pub avatar: String,
    pub name: String,
    pub title: String,
    pub testimonial: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettingsProps {
    pub use_view_transitions: Option<bool>,
    pub use_animations: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn test_nav_items() {
        let items: Vec<NavItem> = serde_json::from_value(json!([
            { "text": "Overview", "link": "/overview" },
            {
                "text": "Core Pages",
                "dropdown": [
                    { "text": "Blog", "link": "/blog" },
                    { "text": "RSS Feed", "link": "/rss.xml", "newTab": true, "icon": "tabler/rss" }
                ]
            }
        ]))
        .unwrap();

        let texts: Vec<String> = items.iter().map(|item| item.text().to_string()).collect();
        expect_that!(texts, elements_are![eq("Overview"), eq("Core Pages")]);
        expect_that!(items.first().map(|item| item.links().count()), some(eq(1)));

        let Some(NavItem::Dropdown(dropdown)) = items.get(1) else {
            panic!("expected a dropdown, got {items:?}");
        };
        expect_that!(
            dropdown.dropdown.get(1),
            some(eq(&NavLink {
                text: "RSS Feed".to_string(),
                link: "/rss.xml".to_string(),
                new_tab: Some(true),
                icon: Some("tabler/rss".to_string()),
            }))
        );
    }

    #[rstest]
    #[case::link_and_dropdown(json!({ "text": "A", "link": "/a", "dropdown": [] }))]
    #[case::nested_dropdown(json!({
        "text": "A",
        "dropdown": [{ "text": "B", "dropdown": [{ "text": "C", "link": "/c" }] }]
    }))]
    #[case::neither(json!({ "text": "A" }))]
    fn test_nav_item_rejected(#[case] value: serde_json::Value) {
        assert!(serde_json::from_value::<NavItem>(value).is_err());
    }

    #[rstest]
    fn test_site_data_camel_case() {
        let data: SiteData = serde_json::from_value(json!({
            "name": "Starter",
            "title": "Starter",
            "description": "An empty project",
            "author": { "name": "Cosmic Themes", "email": "creator@example.com", "twitter": "Cosmic_Themes" },
            "defaultImage": { "src": "/images/logo.jpg", "alt": "Logo" }
        }))
        .unwrap();

        assert_eq!(data.default_image.alt, "Logo");
        assert_eq!(data.author.twitter, "Cosmic_Themes");
    }
}
