//! The JavaScript <-> native bridge.
//!
//! Messages flow in both directions:
//! - **JS -> native**: injected shims call
//!   `window.ipc.postMessage(JSON.stringify({name, body}))`, which the
//!   webview delivers to [`BridgeDispatcher::dispatch_raw`].
//! - **native -> JS**: handlers evaluate script in the page context via
//!   the [`PageHost`] seam. That is the only response channel; no bridge
//!   call ever blocks the page on a reply.

pub mod dispatcher;
pub mod host;
pub mod injector;
pub mod message;
pub mod notify;
pub mod shims;

pub use dispatcher::BridgeDispatcher;
pub use host::PageHost;
pub use injector::InjectionController;
pub use message::{BridgeMessage, NotificationRequest, UNDEFINED_SENTINEL};
pub use notify::NotificationService;
pub use shims::{shim_set, FrameScope, InjectionTiming, ShimScript};
