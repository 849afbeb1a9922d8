//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop: one window, one webview, the bridge dispatcher, and the
//! keyboard-triggered shell actions.

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key, ModifiersState};
use winit::window::{Window, WindowId};

use kiosk_bridge::{BridgeDispatcher, InjectionController, NotificationService};
use kiosk_common::{Action, KioskError, Result};
use kiosk_config::KioskConfig;
use kiosk_platform::{Clipboard, DesktopNotifier, HttpImageFetch, SystemOpener, SystemPower};
use kiosk_webview::{PageLoadState, WebViewConfig, WebViewEvent, WebViewHandle, WebViewManager};

/// How often to drain webview events.
const POLL_INTERVAL: Duration = Duration::from_millis(33);

/// Top-level application state.
pub struct KioskApp {
    config: KioskConfig,
    injector: InjectionController,
    dispatcher: BridgeDispatcher,
    manager: WebViewManager,

    // Windowing
    window: Option<Arc<Window>>,
    webview: Option<WebViewHandle>,

    // Modifier tracking (winit sends these separately)
    modifiers: ModifiersState,

    // Title / loading state
    document_title: Option<String>,
    loading: bool,
    first_load_finished: bool,

    // Keeps the icon-fetch runtime alive for the process lifetime.
    #[allow(dead_code)]
    tokio_runtime: tokio::runtime::Runtime,
}

impl KioskApp {
    pub fn new(config: KioskConfig) -> Result<Self> {
        let tokio_runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| KioskError::Other(format!("failed to create async runtime: {e}")))?;

        let injector = InjectionController::from_config(&config.page);
        let notifications = NotificationService::new(
            Arc::new(DesktopNotifier::new(config.page.title.clone())),
            Arc::new(HttpImageFetch::new()),
            Some(tokio_runtime.handle().clone()),
            config.page.title.clone(),
        );
        let dispatcher =
            BridgeDispatcher::new(notifications, Box::new(SystemPower), Box::new(SystemOpener));

        Ok(Self {
            config,
            injector,
            dispatcher,
            manager: WebViewManager::new(),
            window: None,
            webview: None,
            modifiers: ModifiersState::empty(),
            document_title: None,
            loading: false,
            first_load_finished: false,
            tokio_runtime,
        })
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) {
        let attrs = Window::default_attributes()
            .with_title(&self.config.page.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let bounds = full_window_bounds(window.inner_size());
        match self.manager.create(
            window.as_ref(),
            bounds,
            &self.config.page.url,
            &WebViewConfig::default(),
            &self.injector,
        ) {
            Ok(webview) => self.webview = Some(webview),
            Err(e) => {
                tracing::error!("Failed to create webview: {e}");
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
    }

    fn process_event(&mut self, event: WebViewEvent) {
        match event {
            WebViewEvent::IpcMessage(body) => {
                if let Some(webview) = self.webview.as_mut() {
                    self.dispatcher.dispatch_raw(&body, webview);
                }
            }
            WebViewEvent::PageLoad {
                state: PageLoadState::Started,
                url,
            } => {
                tracing::debug!(url = %url, "load started");
                self.loading = true;
                self.update_window_title();
            }
            WebViewEvent::PageLoad {
                state: PageLoadState::Finished,
                url,
            } => {
                if let Some(webview) = self.webview.as_mut() {
                    webview.set_current_url(url.clone());
                    self.injector.reload(&url, webview);
                }
                self.loading = false;
                self.first_load_finished = true;
                self.update_window_title();
            }
            WebViewEvent::TitleChanged(title) => {
                self.document_title = Some(title);
                self.update_window_title();
            }
        }
    }

    fn update_window_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let page = &self.config.page;

        let mut title = if page.use_document_title {
            self.document_title
                .clone()
                .unwrap_or_else(|| page.title.clone())
        } else {
            page.title.clone()
        };
        if self.loading && page.show_loading_bar && !self.first_load_finished {
            title = format!("{} - {}", title, page.launching_text);
        }
        window.set_title(&title);
    }

    fn handle_action(&mut self, action: Action, event_loop: &ActiveEventLoop) {
        match action {
            Action::GoHome => {
                let home = self.config.page.url.clone();
                self.load(&home);
            }
            Action::Reload => {
                let current = self
                    .webview
                    .as_ref()
                    .map(|wv| wv.current_url().to_string())
                    .unwrap_or_default();
                if !current.is_empty() {
                    self.load(&current);
                }
            }
            Action::CopyUrl => self.copy_url(),
            Action::ClearNotifications => self.dispatcher.clear_notifications(),
            Action::Quit => event_loop.exit(),
            Action::None => {}
        }
    }

    fn load(&mut self, url: &str) {
        if let Some(webview) = self.webview.as_mut() {
            if let Err(e) = webview.load_url(url) {
                tracing::warn!(url = %url, error = %e, "navigation failed");
            }
        }
    }

    fn copy_url(&self) {
        let url = self
            .webview
            .as_ref()
            .map(|wv| wv.current_url().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| "about:blank".to_string());

        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&url) {
                    tracing::warn!(error = %e, "copy url failed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "clipboard unavailable"),
        }
    }
}

impl ApplicationHandler for KioskApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.create_window(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(webview) = &self.webview {
                    if let Err(e) = webview.set_bounds(full_window_bounds(size)) {
                        tracing::warn!(error = %e, "webview resize failed");
                    }
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    let action = action_for_key(&event.logical_key, self.modifiers);
                    self.handle_action(action, event_loop);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        for event in self.manager.drain_events() {
            self.process_event(event);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }
}

/// Bounds covering the whole parent window.
fn full_window_bounds(size: winit::dpi::PhysicalSize<u32>) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
    }
}

/// Map a keypress to a shell action. Every shortcut requires the
/// primary modifier (Ctrl, or Cmd on macOS).
fn action_for_key(key: &Key, modifiers: ModifiersState) -> Action {
    if !(modifiers.control_key() || modifiers.super_key()) {
        return Action::None;
    }
    match key {
        Key::Character(c) => match c.as_str() {
            "h" => Action::GoHome,
            "r" => Action::Reload,
            "l" => Action::CopyUrl,
            "k" => Action::ClearNotifications,
            "q" => Action::Quit,
            _ => Action::None,
        },
        _ => Action::None,
    }
}
