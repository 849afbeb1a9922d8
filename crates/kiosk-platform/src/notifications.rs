use std::path::PathBuf;
use std::sync::Mutex;

use kiosk_common::{DesktopNotification, PlatformError};
use tracing::{debug, info};

use crate::traits::Notifier;

/// Desktop notification center backed by `notify-rust`.
///
/// On XDG desktops the id of the last delivered notification is kept so
/// a later icon refresh replaces it in place instead of stacking a
/// duplicate popup.
pub struct DesktopNotifier {
    app_name: String,
    last_id: Mutex<Option<u32>>,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            last_id: Mutex::new(None),
        }
    }

    /// Where icon bytes are persisted for the notification server.
    fn icon_cache_path(&self) -> Result<PathBuf, PlatformError> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| {
                PlatformError::NotificationError("could not determine cache directory".into())
            })?
            .join("kiosk");
        std::fs::create_dir_all(&dir)
            .map_err(|e| PlatformError::NotificationError(format!("cache dir: {e}")))?;
        Ok(dir.join("notification-icon"))
    }
}

impl Notifier for DesktopNotifier {
    fn schedule(&self, note: &DesktopNotification) -> Result<(), PlatformError> {
        let id = platform_schedule(&self.app_name, note)?;
        if let Ok(mut last) = self.last_id.lock() {
            *last = id;
        }
        info!(title = %note.title, "desktop notification scheduled");
        Ok(())
    }

    fn refresh(&self, note: &DesktopNotification) -> Result<(), PlatformError> {
        let Some(icon) = note.icon.as_deref() else {
            return Ok(());
        };
        let path = self.icon_cache_path()?;
        std::fs::write(&path, icon)
            .map_err(|e| PlatformError::NotificationError(format!("icon write: {e}")))?;
        let last_id = self.last_id.lock().map(|id| *id).unwrap_or(None);
        platform_refresh(&self.app_name, note, &path, last_id)
    }

    fn set_badge(&self, count: u32) -> Result<(), PlatformError> {
        // No portable badge API; the count is surfaced through the log.
        debug!(count, "notification badge updated");
        Ok(())
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_schedule(
    app_name: &str,
    note: &DesktopNotification,
) -> Result<Option<u32>, PlatformError> {
    let handle = notify_rust::Notification::new()
        .appname(app_name)
        .summary(&note.title)
        .body(&note.body)
        .show()
        .map_err(|e| PlatformError::NotificationError(e.to_string()))?;
    Ok(Some(handle.id()))
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn platform_schedule(
    app_name: &str,
    note: &DesktopNotification,
) -> Result<Option<u32>, PlatformError> {
    notify_rust::Notification::new()
        .appname(app_name)
        .summary(&note.title)
        .body(&note.body)
        .show()
        .map_err(|e| PlatformError::NotificationError(e.to_string()))?;
    Ok(None)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_refresh(
    app_name: &str,
    note: &DesktopNotification,
    icon_path: &std::path::Path,
    last_id: Option<u32>,
) -> Result<(), PlatformError> {
    let mut builder = notify_rust::Notification::new();
    builder
        .appname(app_name)
        .summary(&note.title)
        .body(&note.body);
    if let Some(path) = icon_path.to_str() {
        builder.icon(path);
    }
    if let Some(id) = last_id {
        // Reusing the id makes the server replace the shown popup.
        builder.id(id);
    }
    builder
        .show()
        .map_err(|e| PlatformError::NotificationError(e.to_string()))?;
    debug!(title = %note.title, "notification icon attached");
    Ok(())
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn platform_refresh(
    _app_name: &str,
    note: &DesktopNotification,
    _icon_path: &std::path::Path,
    _last_id: Option<u32>,
) -> Result<(), PlatformError> {
    // The shown notification cannot be updated here; it was already
    // delivered without the icon.
    debug!(title = %note.title, "icon arrived after delivery, not refreshable");
    Ok(())
}
