//! Native OS facilities consumed by the bridge, behind small traits so
//! the bridge can be tested against mocks.

pub mod clipboard;
pub mod fetch;
pub mod notifications;
pub mod opener;
pub mod power;
pub mod traits;

pub use clipboard::Clipboard;
pub use fetch::HttpImageFetch;
pub use notifications::DesktopNotifier;
pub use opener::SystemOpener;
pub use power::SystemPower;
pub use traits::{ImageFetch, Notifier, PowerSourceInfo, PowerSources, SystemOpen};
