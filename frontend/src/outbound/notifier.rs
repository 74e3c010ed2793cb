//! Notifier writing user-facing messages to the tracing pipeline.

use tracing::{info, warn};

use crate::domain::ports::{Notification, NotificationKind, Notifier};

/// Emits notifications as log events under the `hostel_admin::notify` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!(target: "hostel_admin::notify", "{}", notification.message);
            }
            NotificationKind::Error => {
                warn!(target: "hostel_admin::notify", "{}", notification.message);
            }
        }
    }
}
