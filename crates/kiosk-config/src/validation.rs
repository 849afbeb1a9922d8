//! Configuration validation.
//!
//! Collects all problems into a single `ConfigError::ValidationError`
//! so the user sees everything wrong with a config at once.

use kiosk_common::ConfigError;

use crate::schema::KioskConfig;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &KioskConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_page(&mut errors, config);
    validate_window(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_page(errors: &mut Vec<String>, config: &KioskConfig) {
    let url = config.page.url.trim();
    if url.is_empty() {
        errors.push("page.url must not be empty".into());
    } else if !url.starts_with("http://") && !url.starts_with("https://") {
        errors.push(format!("page.url must be an http(s) URL, got '{url}'"));
    }

    if config.page.title.trim().is_empty() {
        errors.push("page.title must not be empty".into());
    }
}

fn validate_window(errors: &mut Vec<String>, config: &KioskConfig) {
    if config.window.width == 0 {
        errors.push("window.width must be greater than 0".into());
    }
    if config.window.height == 0 {
        errors.push("window.height must be greater than 0".into());
    }
}
