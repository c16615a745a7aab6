//! Notification port

use crate::domain::Notification;

/// Receives user-facing notifications (toasts in a GUI, lines in a terminal)
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
