use kiosk_common::PlatformError;
use tracing::info;

use crate::traits::SystemOpen;

/// Hands URLs to the OS default handler via the `open` crate.
pub struct SystemOpener;

impl SystemOpen for SystemOpener {
    fn open_url(&self, url: &str) -> Result<(), PlatformError> {
        open::that(url).map_err(|e| PlatformError::OpenError(e.to_string()))?;
        info!(url = %url, "opened externally");
        Ok(())
    }
}
