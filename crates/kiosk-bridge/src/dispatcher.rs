//! Native-side message dispatch.

use kiosk_platform::{PowerSourceInfo, PowerSources, SystemOpen};
use tracing::{debug, info, warn};

use crate::host::PageHost;
use crate::message::BridgeMessage;
use crate::notify::NotificationService;

/// Single native-side receiver for all bridge messages.
///
/// Stateless per call apart from the notification counter: each message
/// is handled independently on the UI thread, and no handler failure
/// ever reaches the page or the process; capabilities degrade to
/// silently unavailable.
pub struct BridgeDispatcher {
    notifications: NotificationService,
    power: Box<dyn PowerSources>,
    opener: Box<dyn SystemOpen>,
}

impl BridgeDispatcher {
    pub fn new(
        notifications: NotificationService,
        power: Box<dyn PowerSources>,
        opener: Box<dyn SystemOpen>,
    ) -> Self {
        Self {
            notifications,
            power,
            opener,
        }
    }

    /// Decode and dispatch one raw IPC body from the page.
    pub fn dispatch_raw(&mut self, raw: &str, page: &mut dyn PageHost) {
        match BridgeMessage::from_json(raw) {
            Some(message) => self.dispatch(message, page),
            None => warn!(body_len = raw.len(), "bridge message rejected: not {{name, body}}"),
        }
    }

    /// Route one decoded message to its capability handler.
    pub fn dispatch(&mut self, message: BridgeMessage, page: &mut dyn PageHost) {
        match message {
            BridgeMessage::Notification(request) => self.notifications.deliver(request),
            BridgeMessage::Console(text) => info!(target: "page", "{text}"),
            BridgeMessage::Battery => self.handle_battery(page),
            BridgeMessage::OpenExternal(url) => {
                if let Err(e) = self.opener.open_url(&url) {
                    warn!(url = %url, error = %e, "external open failed");
                }
            }
            BridgeMessage::Open(url) => {
                if let Err(e) = page.load(&url) {
                    warn!(url = %url, error = %e, "in-place navigation failed");
                }
            }
            BridgeMessage::Ignored { kind } => {
                debug!(kind = %kind, "ignoring unknown bridge message");
            }
        }
    }

    fn handle_battery(&mut self, page: &mut dyn PageHost) {
        let sources = match self.power.list_sources() {
            Ok(sources) => sources,
            Err(e) => {
                warn!(error = %e, "power source query failed");
                return;
            }
        };
        // No battery hardware: the static shim stays the page's only
        // battery data.
        let Some(source) = sources.first() else {
            return;
        };

        let script = battery_script(source);
        if let Err(e) = page.eval(&script) {
            warn!(error = %e, "battery result injection failed");
        }
    }

    /// Reset the notification counter and badge (surrounding-UI action).
    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    pub fn notification_count(&self) -> u32 {
        self.notifications.count()
    }
}

/// Script assigning the live battery reading into the page.
///
/// `level` keeps the source behavior of integer division: anything
/// short of a full charge truncates to 0.
fn battery_script(source: &PowerSourceInfo) -> String {
    let level = if source.max_capacity == 0 {
        0
    } else {
        source.current_capacity / source.max_capacity
    };
    format!(
        "navigator.battery={{charging:{},timeToEmpty:{},timeToFull:{},level:{}}};",
        source.is_charging, source.time_to_empty, source.time_to_full, level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use kiosk_common::{DesktopNotification, PlatformError, Result};
    use kiosk_platform::{ImageFetch, Notifier};

    // -----------------------------------------------------------------
    // Mock collaborators
    // -----------------------------------------------------------------

    #[derive(Default)]
    struct MockPage {
        loads: Vec<String>,
        evals: Vec<String>,
        url: String,
    }

    impl PageHost for MockPage {
        fn load(&mut self, url: &str) -> Result<()> {
            self.url = url.to_string();
            self.loads.push(url.to_string());
            Ok(())
        }

        fn eval(&mut self, js: &str) -> Result<()> {
            self.evals.push(js.to_string());
            Ok(())
        }

        fn current_url(&self) -> String {
            self.url.clone()
        }
    }

    #[derive(Default)]
    struct MockNotifier {
        scheduled: Mutex<Vec<DesktopNotification>>,
    }

    impl Notifier for MockNotifier {
        fn schedule(&self, note: &DesktopNotification) -> std::result::Result<(), PlatformError> {
            self.scheduled.lock().unwrap().push(note.clone());
            Ok(())
        }

        fn refresh(&self, _note: &DesktopNotification) -> std::result::Result<(), PlatformError> {
            Ok(())
        }

        fn set_badge(&self, _count: u32) -> std::result::Result<(), PlatformError> {
            Ok(())
        }
    }

    struct NoFetch;

    #[async_trait]
    impl ImageFetch for NoFetch {
        async fn fetch(&self, _url: &str) -> std::result::Result<Vec<u8>, PlatformError> {
            Err(PlatformError::FetchError("offline".into()))
        }
    }

    struct MockPower {
        sources: Vec<PowerSourceInfo>,
    }

    impl PowerSources for MockPower {
        fn list_sources(&self) -> std::result::Result<Vec<PowerSourceInfo>, PlatformError> {
            Ok(self.sources.clone())
        }
    }

    #[derive(Default)]
    struct MockOpen {
        opened: Mutex<Vec<String>>,
    }

    impl SystemOpen for MockOpen {
        fn open_url(&self, url: &str) -> std::result::Result<(), PlatformError> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn dispatcher_with(
        notifier: Arc<MockNotifier>,
        opener: Arc<MockOpen>,
        sources: Vec<PowerSourceInfo>,
    ) -> BridgeDispatcher {
        struct OpenerRef(Arc<MockOpen>);
        impl SystemOpen for OpenerRef {
            fn open_url(&self, url: &str) -> std::result::Result<(), PlatformError> {
                self.0.open_url(url)
            }
        }

        BridgeDispatcher::new(
            NotificationService::new(notifier, Arc::new(NoFetch), None, "Kiosk"),
            Box::new(MockPower { sources }),
            Box::new(OpenerRef(opener)),
        )
    }

    fn dispatcher() -> (BridgeDispatcher, Arc<MockNotifier>, Arc<MockOpen>) {
        let notifier = Arc::new(MockNotifier::default());
        let opener = Arc::new(MockOpen::default());
        let d = dispatcher_with(Arc::clone(&notifier), Arc::clone(&opener), Vec::new());
        (d, notifier, opener)
    }

    fn source(current: i32, max: i32) -> PowerSourceInfo {
        PowerSourceInfo {
            is_charging: true,
            current_capacity: current,
            max_capacity: max,
            time_to_empty: 0,
            time_to_full: 32,
        }
    }

    // -----------------------------------------------------------------
    // Notification channel
    // -----------------------------------------------------------------

    #[test]
    fn notification_delivers_title_and_body() {
        let (mut d, notifier, _) = dispatcher();
        let mut page = MockPage::default();

        d.dispatch_raw(
            r#"{"name":"notification","body":{"title":"Hi","body":"there"}}"#,
            &mut page,
        );

        let scheduled = notifier.scheduled.lock().unwrap();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].title, "Hi");
        assert_eq!(scheduled[0].body, "there");
    }

    #[test]
    fn notification_counter_reaches_n_then_clears() {
        let (mut d, _, _) = dispatcher();
        let mut page = MockPage::default();

        for _ in 0..5 {
            d.dispatch_raw(
                r#"{"name":"notification","body":{"title":"t","body":"b"}}"#,
                &mut page,
            );
        }
        assert_eq!(d.notification_count(), 5);

        d.clear_notifications();
        assert_eq!(d.notification_count(), 0);
    }

    #[test]
    fn console_text_on_notification_channel_is_not_a_notification() {
        let (mut d, notifier, _) = dispatcher();
        let mut page = MockPage::default();

        d.dispatch_raw(r#"{"name":"notification","body":"ready in 3ms "}"#, &mut page);

        assert!(notifier.scheduled.lock().unwrap().is_empty());
        assert_eq!(d.notification_count(), 0);
    }

    // -----------------------------------------------------------------
    // Battery
    // -----------------------------------------------------------------

    #[test]
    fn battery_with_no_sources_injects_nothing() {
        let notifier = Arc::new(MockNotifier::default());
        let opener = Arc::new(MockOpen::default());
        let mut d = dispatcher_with(notifier, opener, Vec::new());
        let mut page = MockPage::default();

        d.dispatch(BridgeMessage::Battery, &mut page);

        assert!(page.evals.is_empty());
    }

    #[test]
    fn battery_level_truncates_to_integer() {
        let notifier = Arc::new(MockNotifier::default());
        let opener = Arc::new(MockOpen::default());
        let mut d = dispatcher_with(notifier, opener, vec![source(50, 100)]);
        let mut page = MockPage::default();

        d.dispatch(BridgeMessage::Battery, &mut page);

        assert_eq!(page.evals.len(), 1);
        assert_eq!(
            page.evals[0],
            "navigator.battery={charging:true,timeToEmpty:0,timeToFull:32,level:0};"
        );
    }

    #[test]
    fn battery_full_charge_reports_level_one() {
        let notifier = Arc::new(MockNotifier::default());
        let opener = Arc::new(MockOpen::default());
        let mut d = dispatcher_with(notifier, opener, vec![source(100, 100)]);
        let mut page = MockPage::default();

        d.dispatch(BridgeMessage::Battery, &mut page);

        assert!(page.evals[0].contains("level:1"));
    }

    #[test]
    fn battery_zero_max_capacity_degrades_to_level_zero() {
        let script = battery_script(&source(50, 0));
        assert!(script.contains("level:0"));
    }

    #[test]
    fn battery_uses_first_source_only() {
        let notifier = Arc::new(MockNotifier::default());
        let opener = Arc::new(MockOpen::default());
        let mut d = dispatcher_with(notifier, opener, vec![source(100, 100), source(0, 100)]);
        let mut page = MockPage::default();

        d.dispatch(BridgeMessage::Battery, &mut page);

        assert_eq!(page.evals.len(), 1);
        assert!(page.evals[0].contains("level:1"));
    }

    // -----------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------

    #[test]
    fn open_external_hands_off_exactly_once_without_navigating() {
        let (mut d, _, opener) = dispatcher();
        let mut page = MockPage::default();
        page.url = "https://start.example.com".into();

        d.dispatch_raw(
            r#"{"name":"openExternal","body":"https://example.com"}"#,
            &mut page,
        );

        assert_eq!(
            *opener.opened.lock().unwrap(),
            vec!["https://example.com".to_string()]
        );
        assert!(page.loads.is_empty());
        assert_eq!(page.current_url(), "https://start.example.com");
    }

    #[test]
    fn open_navigates_in_place() {
        let (mut d, _, opener) = dispatcher();
        let mut page = MockPage::default();

        d.dispatch_raw(
            r#"{"name":"open","body":"https://example.com/page2"}"#,
            &mut page,
        );

        assert_eq!(page.loads, vec!["https://example.com/page2".to_string()]);
        assert_eq!(page.current_url(), "https://example.com/page2");
        assert!(opener.opened.lock().unwrap().is_empty());
    }

    // -----------------------------------------------------------------
    // Degradation
    // -----------------------------------------------------------------

    #[test]
    fn unknown_kind_has_no_side_effects() {
        let (mut d, notifier, opener) = dispatcher();
        let mut page = MockPage::default();

        d.dispatch_raw(r#"{"name":"vibrate","body":200}"#, &mut page);

        assert!(notifier.scheduled.lock().unwrap().is_empty());
        assert!(opener.opened.lock().unwrap().is_empty());
        assert!(page.loads.is_empty());
        assert!(page.evals.is_empty());
    }

    #[test]
    fn unparseable_body_is_swallowed() {
        let (mut d, notifier, _) = dispatcher();
        let mut page = MockPage::default();

        d.dispatch_raw("}{ not json", &mut page);
        d.dispatch_raw("", &mut page);

        assert!(notifier.scheduled.lock().unwrap().is_empty());
    }

    #[test]
    fn page_load_failure_does_not_propagate() {
        struct FailingPage;
        impl PageHost for FailingPage {
            fn load(&mut self, _url: &str) -> Result<()> {
                Err(kiosk_common::KioskError::WebView("gone".into()))
            }
            fn eval(&mut self, _js: &str) -> Result<()> {
                Err(kiosk_common::KioskError::WebView("gone".into()))
            }
            fn current_url(&self) -> String {
                String::new()
            }
        }

        let (mut d, _, _) = dispatcher();
        let mut page = FailingPage;
        // Neither call may panic or return an error to the caller.
        d.dispatch(BridgeMessage::Open("https://x".into()), &mut page);
        d.dispatch(BridgeMessage::Battery, &mut page);
    }
}
