//! Notification delivery, the counter, and the icon fetch.

use std::sync::{Arc, Mutex, Weak};

use kiosk_common::{DesktopNotification, DeliveredQueue};
use kiosk_platform::{ImageFetch, Notifier};
use tracing::{debug, warn};

use crate::message::{NotificationRequest, UNDEFINED_SENTINEL};

/// Delivers desktop notifications for the bridge and owns the
/// per-session notification counter that drives the badge.
///
/// The counter is plain session state: constructed at zero, bumped per
/// scheduled notification, reset only by the explicit clear action.
pub struct NotificationService {
    notifier: Arc<dyn Notifier>,
    fetcher: Arc<dyn ImageFetch>,
    /// Runtime for the fire-and-forget icon fetch. Without one the
    /// notification is simply delivered icon-less.
    runtime: Option<tokio::runtime::Handle>,
    app_title: String,
    delivered: DeliveredQueue,
    count: u32,
}

impl NotificationService {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        fetcher: Arc<dyn ImageFetch>,
        runtime: Option<tokio::runtime::Handle>,
        app_title: impl Into<String>,
    ) -> Self {
        Self {
            notifier,
            fetcher,
            runtime,
            app_title: app_title.into(),
            delivered: DeliveredQueue::default(),
            count: 0,
        }
    }

    /// Deliver one notification request from the page.
    ///
    /// A sentinel body means the page sent only a title: the headline
    /// becomes the configured app title and the body becomes the sent
    /// title.
    pub fn deliver(&mut self, request: NotificationRequest) {
        let note = if request.body == UNDEFINED_SENTINEL {
            DesktopNotification::new(&self.app_title, &request.title)
        } else {
            DesktopNotification::new(&request.title, &request.body)
        };

        if let Err(e) = self.notifier.schedule(&note) {
            warn!(error = %e, "notification delivery failed");
            return;
        }

        self.count += 1;
        if let Err(e) = self.notifier.set_badge(self.count) {
            warn!(error = %e, "badge update failed");
        }

        let record = self.delivered.push(note);
        if request.icon != UNDEFINED_SENTINEL {
            self.spawn_icon_fetch(request.icon, record);
        }
    }

    /// Reset the counter and badge. Triggered by the surrounding UI,
    /// never by a bridge message.
    pub fn clear(&mut self) {
        self.count = 0;
        if let Err(e) = self.notifier.set_badge(0) {
            warn!(error = %e, "badge update failed");
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Fetch the icon in the background and attach it to the shared
    /// record in place. The notification is already visible; whether
    /// the icon lands before or after display is unspecified, and a
    /// failed fetch leaves the notification icon-less.
    fn spawn_icon_fetch(&self, url: String, record: Weak<Mutex<DesktopNotification>>) {
        let Some(runtime) = &self.runtime else {
            debug!(url = %url, "no async runtime, notification stays icon-less");
            return;
        };

        let notifier = Arc::clone(&self.notifier);
        let fetcher = Arc::clone(&self.fetcher);
        runtime.spawn(async move {
            let bytes = match fetcher.fetch(&url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!(url = %url, error = %e, "icon fetch failed");
                    return;
                }
            };

            // The record may have been evicted by newer notifications.
            let Some(shared) = record.upgrade() else {
                return;
            };
            let snapshot = {
                let Ok(mut note) = shared.lock() else {
                    return;
                };
                note.icon = Some(bytes);
                note.clone()
            };
            if let Err(e) = notifier.refresh(&snapshot) {
                debug!(error = %e, "icon refresh failed");
            }
        });
    }
}
