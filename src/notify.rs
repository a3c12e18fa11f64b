//! User Notifications
//!
//! Blocking alerts shown after page actions.

/// Sink for user-facing messages
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// `window.alert` in the browser
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn alert(&self, message: &str) {
        let shown = web_sys::window().map(|w| w.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            log::warn!("could not show alert: {}", message);
        }
    }
}
