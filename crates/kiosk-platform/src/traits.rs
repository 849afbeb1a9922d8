//! Collaborator interfaces between the bridge and the OS.

use async_trait::async_trait;
use kiosk_common::{DesktopNotification, PlatformError};

/// Desktop notification center.
pub trait Notifier: Send + Sync {
    /// Schedule a notification for immediate delivery.
    fn schedule(&self, note: &DesktopNotification) -> Result<(), PlatformError>;

    /// Best-effort in-place refresh after the record changed (icon
    /// arrived). Platforms that cannot update a shown notification
    /// ignore this.
    fn refresh(&self, note: &DesktopNotification) -> Result<(), PlatformError>;

    /// Push the unread-notification count to the badge display.
    fn set_badge(&self, count: u32) -> Result<(), PlatformError>;
}

/// OS default-handler dispatch for external URLs.
pub trait SystemOpen: Send + Sync {
    fn open_url(&self, url: &str) -> Result<(), PlatformError>;
}

/// One reported power source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerSourceInfo {
    pub is_charging: bool,
    pub current_capacity: i32,
    pub max_capacity: i32,
    /// Seconds until empty while discharging; 0 when unknown.
    pub time_to_empty: i32,
    /// Seconds until full while charging; 0 when unknown.
    pub time_to_full: i32,
}

/// Native power-source query. A machine without battery hardware
/// reports an empty list, not an error.
pub trait PowerSources: Send + Sync {
    fn list_sources(&self) -> Result<Vec<PowerSourceInfo>, PlatformError>;
}

/// Asynchronous image download for notification icons.
#[async_trait]
pub trait ImageFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PlatformError>;
}
