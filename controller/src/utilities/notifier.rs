use crossbeam_channel::Sender;
use tracing::warn;

use shared_resources::notification::Notification;

/// Sending half of the notification channel. A vanished receiver is not an
/// error for the controller.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Sender<Notification>,
    disconnected: bool,
}

impl Notifier {
    pub fn new(tx: Sender<Notification>) -> Self {
        Notifier { tx, disconnected: false }
    }

    pub fn emit(&mut self, notification: Notification) {
        if self.tx.send(notification).is_err() && !self.disconnected {
            warn!("notification receiver disconnected, dropping further notifications");
            self.disconnected = true;
        }
    }
}
