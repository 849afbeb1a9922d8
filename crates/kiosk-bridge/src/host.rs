use kiosk_common::Result;

/// Navigation and script-evaluation surface of the hosted page.
///
/// Implemented by the webview handle; mocked in dispatcher tests.
pub trait PageHost {
    /// Navigate the page in place.
    fn load(&mut self, url: &str) -> Result<()>;

    /// Evaluate JavaScript in the page's execution context.
    fn eval(&mut self, js: &str) -> Result<()>;

    /// Best-effort current URL of the page.
    fn current_url(&self) -> String;
}
