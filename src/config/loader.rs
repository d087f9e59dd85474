//! Reading `.site-content.json`.

use std::path::Path;

use super::{
    ConfigError,
    SiteSettings,
};
use crate::input::parse_jsonc;

/// Project configuration file, looked up at the project root.
pub const CONFIG_FILE_NAME: &str = ".site-content.json";

/// Reads the project configuration file.
///
/// Comments and trailing commas are accepted.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and was parsed
/// - `Ok(None)`: there is no configuration file
///
/// # Errors
/// - File read error
/// - Parse error
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<SiteSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let value = parse_jsonc(&content).map_err(ConfigError::ParseError)?;
    let settings: SiteSettings =
        serde_json::from_value(value).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn test_load_from_workspace_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{
            // content lives outside src
            "contentDir": "content",
            "locales": ["en", "fr", "de"],
        }"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let result = load_from_workspace(temp_dir.path());

        let settings = result.unwrap().unwrap();
        assert_eq!(settings.content_dir, "content");
        assert_eq!(settings.locales.len(), 3);
        assert_eq!(settings.config_dir, "src/config");
    }

    #[rstest]
    fn test_load_from_workspace_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.unwrap().is_none());
    }

    #[rstest]
    fn test_load_from_workspace_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[rstest]
    fn test_load_from_workspace_wrong_type() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"locales": "en"}"#).unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
