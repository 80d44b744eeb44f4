//! Notifier that writes notifications to the log.
//!
//! Used when no host UI is attached.

use crate::infrastructure::ports::{Notification, NotificationLevel, NotifierPort};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotifierPort for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let dismiss_ms = notification.dismiss_after.as_millis() as u64;
        match notification.level {
            NotificationLevel::Error => {
                tracing::warn!(dismiss_ms, "{}", notification.message)
            }
            NotificationLevel::Success | NotificationLevel::Info => {
                tracing::info!(dismiss_ms, "{}", notification.message)
            }
        }
    }
}
