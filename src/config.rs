//! Project configuration.
mod loader;
mod manager;
mod matcher;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    CmsSettings,
    CmsStorageMode,
    ConfigError,
    DiagnosticsConfig,
    IndexingConfig,
    Severity,
    SiteSettings,
    ValidationError,
};
