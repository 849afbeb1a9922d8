//! WebView lifecycle management.
//!
//! `WebViewManager` builds the single hosted webview with the bridge's
//! document-start shims registered as initialization scripts, so every
//! navigation re-executes them before page script runs.

use std::sync::{Arc, Mutex};

use kiosk_bridge::{InjectionController, PageHost};
use kiosk_common::{KioskError, Result};
use tracing::debug;
use wry::raw_window_handle;
use wry::{WebView, WebViewBuilder};

use crate::events::{PageLoadState, WebViewEvent};

/// Configuration for creating the hosted webview.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    /// Whether to enable clipboard access for the page.
    pub clipboard: bool,
    /// Whether to enable autoplay for media.
    pub autoplay: bool,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            devtools: cfg!(debug_assertions),
            user_agent: Some("Kiosk/0.1".to_string()),
            clipboard: true,
            autoplay: true,
        }
    }
}

/// Handle to the hosted webview: navigation, script evaluation, and
/// best-effort URL tracking.
pub struct WebViewHandle {
    webview: WebView,
    current_url: String,
}

impl WebViewHandle {
    /// Navigate to a URL.
    pub fn load_url(&mut self, url: &str) -> Result<()> {
        self.current_url = url.to_string();
        self.webview
            .load_url(url)
            .map_err(|e| KioskError::WebView(e.to_string()))
    }

    /// Execute JavaScript in the page context.
    pub fn evaluate_script(&self, js: &str) -> Result<()> {
        self.webview
            .evaluate_script(js)
            .map_err(|e| KioskError::WebView(e.to_string()))
    }

    /// Get the tracked URL.
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Update the tracked URL from a navigation event.
    pub fn set_current_url(&mut self, url: String) {
        self.current_url = url;
    }

    /// Resize the webview within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<()> {
        self.webview
            .set_bounds(bounds)
            .map_err(|e| KioskError::WebView(e.to_string()))
    }
}

impl PageHost for WebViewHandle {
    fn load(&mut self, url: &str) -> Result<()> {
        self.load_url(url)
    }

    fn eval(&mut self, js: &str) -> Result<()> {
        self.evaluate_script(js)
    }

    fn current_url(&self) -> String {
        self.current_url.clone()
    }
}

/// Builds the webview and collects its events for the app loop.
pub struct WebViewManager {
    /// Event sink; the main event loop drains these each tick.
    events: Arc<Mutex<Vec<WebViewEvent>>>,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        let mut events = self.events.lock().unwrap();
        std::mem::take(&mut *events)
    }

    /// Create the hosted webview as a child of the given window, sized
    /// to `bounds`, loading `url`, with the injection controller's
    /// document-start shims registered.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        url: &str,
        config: &WebViewConfig,
        injector: &InjectionController,
    ) -> Result<WebViewHandle> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_autoplay(config.autoplay);

        // Document-start shims: re-executed by the engine in every
        // fresh document context, before page script runs.
        for shim in injector.initialization_scripts() {
            builder = builder.with_initialization_script(shim.source.as_ref());
        }

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        // IPC: JS -> native. Bodies are decoded by the dispatcher, not
        // here; this stays a dumb pipe.
        let ipc_events = Arc::clone(&self.events);
        builder = builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();
            debug!(body_len = body.len(), "IPC message from page");
            if let Ok(mut evts) = ipc_events.lock() {
                evts.push(WebViewEvent::IpcMessage(body));
            }
        });

        let load_events = Arc::clone(&self.events);
        builder = builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            if let Ok(mut evts) = load_events.lock() {
                evts.push(WebViewEvent::PageLoad { state, url });
            }
        });

        let title_events = Arc::clone(&self.events);
        builder = builder.with_document_title_changed_handler(move |title| {
            debug!(title = %title, "title changed");
            if let Ok(mut evts) = title_events.lock() {
                evts.push(WebViewEvent::TitleChanged(title));
            }
        });

        // The hosted page is free to navigate; external handoff goes
        // through the bridge, not through blocked navigations.
        builder = builder.with_navigation_handler(move |url| {
            debug!(url = %url, "navigation requested");
            true
        });

        builder = builder.with_url(url);

        let webview = builder
            .build_as_child(window)
            .map_err(|e| KioskError::WebView(e.to_string()))?;

        debug!(url = %url, "webview created");

        Ok(WebViewHandle {
            webview,
            current_url: url.to_string(),
        })
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}
