use serde::{Deserialize, Serialize};

/// Every user-triggerable action in the shell.
///
/// Keyboard shortcuts resolve to an `Action`; the app state matches on
/// this enum to route to subsystems. Bridge messages never produce one
/// of these; they go through the dispatcher instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Navigate the hosted page back to the configured home URL.
    GoHome,
    /// Reload the currently displayed URL.
    Reload,
    /// Copy the current URL to the system clipboard.
    CopyUrl,
    /// Reset the notification counter and badge to zero.
    ClearNotifications,
    /// Exit the shell.
    Quit,
    /// No-op.
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serde_roundtrip() {
        for action in [
            Action::GoHome,
            Action::Reload,
            Action::CopyUrl,
            Action::ClearNotifications,
            Action::Quit,
            Action::None,
        ] {
            let json = serde_json::to_string(&action).unwrap();
            let back: Action = serde_json::from_str(&json).unwrap();
            assert_eq!(back, action);
        }
    }
}
