//! User-facing toast notifications.

use std::sync::Mutex;

use actix_web_flash_messages::FlashMessage;

/// Fire-and-forget notification sink.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Delivers notifications as flash messages shown on the next rendered page.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlashNotifier;

impl Notifier for FlashNotifier {
    fn success(&self, message: &str) {
        FlashMessage::success(message).send();
    }

    fn error(&self, message: &str) {
        FlashMessage::error(message).send();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Keeps every notification in memory, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn push(&self, notification: Notification) {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }
}
