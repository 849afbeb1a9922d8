//! Configuration schema.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    pub page: PageConfig,
    pub window: WindowConfig,
}

/// Settings for the hosted page and its bridge shims.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Home URL loaded at startup and by the go-home action.
    pub url: String,
    /// App title, used for the window and as the notification headline
    /// when a page sends a notification without a body.
    pub title: String,
    /// Follow the page's document title for the window title.
    pub use_document_title: bool,
    /// Text shown while the first page load is in flight.
    pub launching_text: String,
    /// Route `target="_blank"` links to the OS default browser instead
    /// of navigating in place.
    pub open_in_new_screen: bool,
    /// Surface load progress in the shell chrome.
    pub show_loading_bar: bool,
    /// Install the console.log/warn/error relay shim.
    pub console_support: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            url: "https://www.google.com".into(),
            title: "Kiosk".into(),
            use_document_title: true,
            launching_text: "Launching...".into(),
            open_in_new_screen: false,
            show_loading_bar: true,
            console_support: true,
        }
    }
}

/// Initial window geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 640,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_config_defaults() {
        let config = PageConfig::default();
        assert_eq!(config.url, "https://www.google.com");
        assert_eq!(config.title, "Kiosk");
        assert!(config.use_document_title);
        assert!(!config.open_in_new_screen);
        assert!(config.show_loading_bar);
        assert!(config.console_support);
    }

    #[test]
    fn window_config_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.width, 1000);
        assert_eq!(config.height, 640);
    }

    #[test]
    fn partial_toml_preserves_defaults() {
        let toml_str = r#"
[page]
url = "https://app.example.com"
console_support = false

[window]
width = 1280
"#;
        let config: KioskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.page.url, "https://app.example.com");
        assert!(!config.page.console_support);
        assert_eq!(config.window.width, 1280);
        // Defaults preserved
        assert_eq!(config.page.title, "Kiosk");
        assert!(config.page.use_document_title);
        assert_eq!(config.window.height, 640);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: KioskConfig = toml::from_str("").unwrap();
        assert_eq!(config.page.url, "https://www.google.com");
        assert_eq!(config.window.width, 1000);
    }

    #[test]
    fn serialization_roundtrip() {
        let config = KioskConfig {
            page: PageConfig {
                url: "https://chat.example.com".into(),
                title: "Chat".into(),
                use_document_title: false,
                launching_text: "Starting...".into(),
                open_in_new_screen: true,
                show_loading_bar: false,
                console_support: false,
            },
            window: WindowConfig {
                width: 800,
                height: 600,
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: KioskConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.page.url, config.page.url);
        assert_eq!(back.page.open_in_new_screen, config.page.open_in_new_screen);
        assert_eq!(back.window.width, config.window.width);
    }
}
