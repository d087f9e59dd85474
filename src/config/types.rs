use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Project settings read from `.site-content.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    /// Root of the content collections, relative to the project root.
    pub content_dir: String,
    /// Directory holding `translationData.json` and the per-locale tables.
    pub config_dir: String,

    pub locales: Vec<String>,
    /// Locale served without a path prefix.
    pub default_locale: String,

    pub exclude_patterns: Vec<String>,

    pub indexing: IndexingConfig,
    pub cms: CmsSettings,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexingConfig {
    /// Parallel thread count for indexing.
    /// Default: 80% of CPU cores (minimum 1).
    pub num_threads: Option<usize>,
}

impl IndexingConfig {
    /// Effective worker count.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.num_threads.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1))
    }
}

/// Storage backend selection for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CmsStorageMode {
    /// Local in development, cloud otherwise.
    #[default]
    Auto,
    Local,
    Cloud,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CmsSettings {
    pub storage: CmsStorageMode,
    /// `team/project` of the hosted backend.
    pub cloud_project: Option<String>,
    pub brand_name: String,
    /// Locale whose entries the editor works on.
    pub locale: String,
}

impl Default for CmsSettings {
    fn default() -> Self {
        Self {
            storage: CmsStorageMode::Auto,
            cloud_project: None,
            brand_name: "Site".to_string(),
            locale: "en".to_string(),
        }
    }
}

/// How a class of findings is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosticsConfig {
    /// Translation keys present in some locales only.
    pub key_parity: Severity,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { key_parity: Severity::Warning }
    }
}

impl SiteSettings {
    /// `configDir` resolved against the project root.
    #[must_use]
    pub fn config_path(&self, root: &Path) -> PathBuf {
        root.join(&self.config_dir)
    }

    /// # Errors
    /// - Required field is empty
    /// - Default locale not among the locales
    /// - Invalid glob pattern
    /// - Cloud storage without a project
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.content_dir.trim().is_empty() {
            errors.push(ValidationError::new(
                "contentDir",
                "The directory cannot be empty. Example: \"src/data\"",
            ));
        }

        if self.config_dir.trim().is_empty() {
            errors.push(ValidationError::new(
                "configDir",
                "The directory cannot be empty. Example: \"src/config\"",
            ));
        }

        if self.locales.is_empty() {
            errors.push(ValidationError::new(
                "locales",
                "At least one locale is required. Example: [\"en\", \"fr\"]",
            ));
        }

        for (index, locale) in self.locales.iter().enumerate() {
            if locale.is_empty() || locale.contains('/') {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    format!("Invalid locale '{locale}': a locale must be a single path segment"),
                ));
            }
        }

        if !self.locales.is_empty() && !self.locales.contains(&self.default_locale) {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!(
                    "'{}' is not one of the configured locales ({})",
                    self.default_locale,
                    self.locales.join(", ")
                ),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.indexing.num_threads == Some(0) {
            errors.push(ValidationError::new(
                "indexing.numThreads",
                "The thread count must be at least 1, or removed to use the default",
            ));
        }

        if self.cms.storage == CmsStorageMode::Cloud && self.cms.cloud_project.is_none() {
            errors.push(ValidationError::new(
                "cms.cloudProject",
                "Cloud storage requires a project. Example: \"team/project\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            content_dir: "src/data".to_string(),
            config_dir: "src/config".to_string(),
            locales: vec!["en".to_string(), "fr".to_string()],
            default_locale: "en".to_string(),
            exclude_patterns: vec!["node_modules/**".to_string()],
            indexing: IndexingConfig::default(),
            cms: CmsSettings::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}
