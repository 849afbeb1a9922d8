pub mod actions;
pub mod errors;
pub mod notifications;

pub use actions::Action;
pub use errors::{ConfigError, KioskError, PlatformError};
pub use notifications::{DesktopNotification, DeliveredQueue, SharedNotification};

pub type Result<T> = std::result::Result<T, KioskError>;
