//! WebView host for the single hosted page.
//!
//! Wraps the `wry` crate to provide:
//! - WebView construction with the bridge's shims preinstalled
//! - IPC delivery from page script to the native dispatcher
//! - Navigation control and script evaluation (the bridge's page host)
//! - Load / title events for the app loop to drain

pub mod events;
pub mod manager;

pub use events::{PageLoadState, WebViewEvent};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager};
