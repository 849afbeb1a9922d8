//! Shim installation across navigations.

use kiosk_config::PageConfig;
use tracing::{debug, warn};

use crate::host::PageHost;
use crate::shims::{shim_set, InjectionTiming, ShimScript};

/// Installs the shim script set into every loaded document.
///
/// Document-start shims are handed to the webview as initialization
/// scripts; the engine re-executes those in each fresh document context,
/// so every navigation sees them without host involvement.
/// Document-end shims need the parsed DOM and are evaluated by
/// [`InjectionController::reload`], which the navigation layer calls
/// after every finished load.
pub struct InjectionController {
    shims: Vec<ShimScript>,
}

impl InjectionController {
    pub fn from_config(page: &PageConfig) -> Self {
        Self {
            shims: shim_set(page),
        }
    }

    /// The full ordered shim set.
    pub fn shims(&self) -> &[ShimScript] {
        &self.shims
    }

    /// Shims to register as webview initialization scripts.
    pub fn initialization_scripts(&self) -> impl Iterator<Item = &ShimScript> {
        self.shims
            .iter()
            .filter(|s| s.timing == InjectionTiming::DocumentStart)
    }

    /// Re-run injection for a freshly loaded document.
    ///
    /// Evaluates every document-end shim in the page. A failed
    /// evaluation degrades that shim for this load; the rest still run.
    pub fn reload(&self, url: &str, page: &mut dyn PageHost) {
        let mut installed = 0usize;
        for shim in self
            .shims
            .iter()
            .filter(|s| s.timing == InjectionTiming::DocumentEnd)
        {
            match page.eval(&shim.source) {
                Ok(()) => installed += 1,
                Err(e) => warn!(url = %url, error = %e, "document-end shim failed to install"),
            }
        }
        debug!(url = %url, installed, "shims reinstalled");
    }
}
