//! Kiosk configuration system.
//!
//! TOML-based configuration for the shell: which page to host, how the
//! window starts out, and which bridge shims are enabled. All sections
//! use serde defaults so partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{KioskConfig, PageConfig, WindowConfig};

use std::path::Path;

use kiosk_common::ConfigError;

/// Load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a commented
/// default file if none exists, and validates the result.
pub fn load_config() -> Result<KioskConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path (`--config` override).
pub fn load_config_from(path: &Path) -> Result<KioskConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
