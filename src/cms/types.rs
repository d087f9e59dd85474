use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};

/// Editor configuration consumed by the external CMS.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsConfig {
    pub storage: CmsStorage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud: Option<CloudConfig>,
    pub ui: CmsUi,
    #[serde(default)]
    pub collections: BTreeMap<String, CmsCollection>,
    #[serde(default)]
    pub singletons: BTreeMap<String, CmsCollection>,
}

/// Where the editor stores content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CmsStorage {
    /// Files in the working tree.
    Local,
    /// Hosted storage; requires [`CloudConfig`].
    Cloud,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CloudConfig {
    /// `team/project` identifier of the hosted project.
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CmsUi {
    pub brand: CmsBrand,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CmsBrand {
    pub name: String,
}

/// How entries of an editor collection are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CmsFormat {
    /// Front matter with the body in the `content` field.
    Mdx,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsCollection {
    pub label: String,
    /// Glob of the entries, relative to the project root.
    pub path: String,
    pub format: CmsFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug_field: Option<String>,
    pub schema: Vec<CmsField>,
}

impl CmsCollection {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&CmsField> {
        self.schema.iter().find(|field| field.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsField {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: CmsFieldKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CmsFieldKind {
    Text,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Checkbox {
        #[serde(default, rename = "defaultValue")]
        default_value: bool,
    },
    Select {
        options: Vec<String>,
        #[serde(default, rename = "defaultValue", skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Url,
    Date,
    Image,
    Relationship {
        collection: String,
    },
    Array {
        item: Box<CmsField>,
    },
    Object {
        fields: Vec<CmsField>,
    },
    /// Rich text body of a Markdown entry.
    Markdown,
}

impl CmsFieldKind {
    /// Type tag as written in the configuration.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number { .. } => "number",
            Self::Checkbox { .. } => "checkbox",
            Self::Select { .. } => "select",
            Self::Url => "url",
            Self::Date => "date",
            Self::Image => "image",
            Self::Relationship { .. } => "relationship",
            Self::Array { .. } => "array",
            Self::Object { .. } => "object",
            Self::Markdown => "markdown",
        }
    }
}
