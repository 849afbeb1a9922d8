//! Wire format of page-to-native bridge messages.

use serde::Deserialize;
use tracing::warn;

/// Literal stand-in for an absent field, inherited from the page-side
/// JSON encoding. Not the absence-of-value concept.
pub const UNDEFINED_SENTINEL: &str = "undefined";

/// Raw shape posted by the shims: `{name: <kind>, body: <payload>}`.
#[derive(Debug, Deserialize)]
struct RawMessage {
    name: String,
    #[serde(default)]
    body: serde_json::Value,
}

/// A request to deliver a desktop notification.
///
/// Fields carry the `"undefined"` sentinel rather than `Option`: the
/// page-side encoding drops absent keys and the handlers key off the
/// sentinel (a notification whose body is the sentinel gets the
/// title/body role swap).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub icon: String,
}

impl NotificationRequest {
    fn from_value(body: &serde_json::Value) -> Self {
        let field = |key: &str| {
            body.get(key)
                .and_then(|v| v.as_str())
                .unwrap_or(UNDEFINED_SENTINEL)
                .to_string()
        };
        Self {
            title: field("title"),
            body: field("body"),
            icon: field("icon"),
        }
    }
}

/// Every message kind the bridge accepts, decoded and validated.
///
/// Unknown kinds land in [`BridgeMessage::Ignored`] so page code can
/// post forward-compatible messages without faulting the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeMessage {
    /// Deliver a desktop notification.
    Notification(NotificationRequest),
    /// Relay page console output to the process log.
    Console(String),
    /// Query the native power source and push the result into the page.
    Battery,
    /// Hand a URL to the OS default handler.
    OpenExternal(String),
    /// Navigate the hosted page in place.
    Open(String),
    /// Unknown kind; dropped without error.
    Ignored { kind: String },
}

impl BridgeMessage {
    /// Parse a bridge message from the raw JSON a shim posted.
    ///
    /// Returns `None` only when the payload is not the `{name, body}`
    /// shape at all; a recognized shape with an unknown kind decodes to
    /// [`BridgeMessage::Ignored`].
    pub fn from_json(raw: &str) -> Option<Self> {
        let raw: RawMessage = serde_json::from_str(raw).ok()?;
        Some(Self::from_raw(raw))
    }

    fn from_raw(raw: RawMessage) -> Self {
        match raw.name.as_str() {
            // The notification channel doubles as the legacy console
            // relay: a bare string body is console output, an object is
            // a notification request.
            "notification" => match raw.body.as_str() {
                Some(text) => BridgeMessage::Console(text.to_string()),
                None => BridgeMessage::Notification(NotificationRequest::from_value(&raw.body)),
            },
            "console" => match raw.body.as_str() {
                Some(text) => BridgeMessage::Console(text.to_string()),
                None => BridgeMessage::Console(raw.body.to_string()),
            },
            "battery" => BridgeMessage::Battery,
            "openExternal" => match raw.body.as_str() {
                Some(url) => BridgeMessage::OpenExternal(url.to_string()),
                None => {
                    warn!(kind = %raw.name, "dropping message with non-string URL body");
                    BridgeMessage::Ignored { kind: raw.name }
                }
            },
            "open" => match raw.body.as_str() {
                Some(url) => BridgeMessage::Open(url.to_string()),
                None => {
                    warn!(kind = %raw.name, "dropping message with non-string URL body");
                    BridgeMessage::Ignored { kind: raw.name }
                }
            },
            _ => BridgeMessage::Ignored { kind: raw.name },
        }
    }
}
