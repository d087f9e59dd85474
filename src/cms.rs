//! Editor (CMS) configuration.
//!
//! The editor configuration is derived from the schema registry so both
//! sides share one declaration. A hand-edited configuration can be compared
//! with the registry through [`drift`].

mod derive;
mod drift;
mod types;

use thiserror::Error;

pub use drift::{
    CmsDrift,
    drift,
};
pub use types::{
    CloudConfig,
    CmsBrand,
    CmsCollection,
    CmsConfig,
    CmsField,
    CmsFieldKind,
    CmsFormat,
    CmsStorage,
    CmsUi,
};

/// Environment variable that marks a development build.
pub const DEV_ENV_VAR: &str = "SITE_CONTENT_DEV";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CmsError {
    #[error("Cloud storage selected but 'cms.cloudProject' is not set")]
    MissingCloudProject,

    #[error("Failed to parse CMS configuration: {0}")]
    Parse(String),
}

impl CmsConfig {
    /// Parses a CMS configuration written as JSON (comments allowed).
    ///
    /// # Errors
    /// Returns [`CmsError::Parse`] for malformed input.
    pub fn from_json(text: &str) -> Result<Self, CmsError> {
        let value = crate::input::parse_jsonc(text).map_err(CmsError::Parse)?;
        serde_json::from_value(value).map_err(|e| CmsError::Parse(e.to_string()))
    }
}
