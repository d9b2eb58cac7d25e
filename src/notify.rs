//! Notification channel for user-facing failure reports

use std::sync::Mutex;
use tracing::{debug, warn};

/// Fire-and-forget notification sink. Implementations must not fail the caller.
pub trait Notifier {
    fn notify(&self, message: &str, debug_only: bool);
}

/// Routes notifications into the tracing pipeline.
///
/// Regular messages are warnings; debug-only messages are emitted at debug
/// level unless `show_debug` promotes them.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier {
    show_debug: bool,
}

impl TracingNotifier {
    pub fn new(show_debug: bool) -> Self {
        Self { show_debug }
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, debug_only: bool) {
        if debug_only && !self.show_debug {
            debug!(target: "periodic_notes::notify", "{}", message);
        } else {
            warn!(target: "periodic_notes::notify", "{}", message);
        }
    }
}

/// A notification as recorded by `RecordingNotifier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub debug_only: bool,
}

/// Keeps every notification in memory, for callers that present them later.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, debug_only: bool) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(Notification {
                message: message.to_string(),
                debug_only,
            });
        }
    }
}
