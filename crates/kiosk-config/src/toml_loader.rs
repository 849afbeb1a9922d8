//! TOML config loading: read from path or platform default.

use std::path::{Path, PathBuf};

use kiosk_common::ConfigError;
use tracing::info;

use crate::schema::KioskConfig;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
pub fn load_from_path(path: &Path) -> Result<KioskConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: KioskConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/kiosk/config.toml`
/// On Linux: `~/.config/kiosk/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<KioskConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::ParseError(msg)) if msg.contains("failed to read") => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(KioskConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("kiosk").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Kiosk Configuration
# Only override what you want to change -- missing fields use defaults.

[page]
# Url to browse to.
url = "https://www.google.com"

# App title. Also used as the notification headline when a page sends
# a notification without a body.
# title = "Kiosk"

# Follow the page's document title for the window title?
# use_document_title = true

# Text shown while the first load is in flight.
# launching_text = "Launching..."

# Open target=_blank links in the default browser instead of in place?
# open_in_new_screen = false

# Surface load progress in the window title?
# show_loading_bar = true

# Relay the page's console.log/warn/error to the process log?
# console_support = true

[window]
# width = 1000
# height = 640
"##
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_path_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[page]\nurl = \"https://example.com\"\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.page.url, "https://example.com");
        assert_eq!(config.page.title, "Kiosk");
    }

    #[test]
    fn load_from_path_missing_file_is_parse_error() {
        let err = load_from_path(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(msg) if msg.contains("failed to read")));
    }

    #[test]
    fn load_from_path_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[page\nurl =").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(msg) if msg.contains("parse TOML")));
    }

    #[test]
    fn create_default_config_writes_parseable_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        create_default_config(&path).unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.page.url, "https://www.google.com");
        assert_eq!(config.window.width, 1000);
        assert_eq!(config.window.height, 640);
    }

    #[test]
    fn template_matches_schema_defaults() {
        let from_template: crate::schema::KioskConfig =
            toml::from_str(default_config_toml()).unwrap();
        let defaults = crate::schema::KioskConfig::default();
        assert_eq!(from_template.page.url, defaults.page.url);
        assert_eq!(from_template.page.title, defaults.page.title);
        assert_eq!(from_template.window.width, defaults.window.width);
    }
}
