//! Notification sink: the one-way surface toward the operator.
//!
//! The store announces state transitions (setpoint changes, enable/disable,
//! process start/stop, alarms, connectivity changes) as human-readable
//! notices. Delivery is fire-and-forget and never affects store state. The
//! UI layer that would render these as toasts is out of scope; the default
//! sink routes them to the tracing log.

use std::sync::{Arc, Mutex};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Receives transition notices from the store.
pub trait NotificationSink: Send {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Routes notices to the tracing log.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info | NoticeLevel::Success => tracing::info!(target: "notice", "{message}"),
            NoticeLevel::Warning => tracing::warn!(target: "notice", "{message}"),
            NoticeLevel::Error => tracing::error!(target: "notice", "{message}"),
        }
    }
}

/// Collects notices in memory so tests can assert on them.
#[derive(Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Drain every notice recorded so far.
    pub fn take(&self) -> Vec<(NoticeLevel, String)> {
        std::mem::take(&mut *self.notices.lock().expect("sink poisoned"))
    }

    /// Messages only, in arrival order, without draining.
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .expect("sink poisoned")
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices
            .lock()
            .expect("sink poisoned")
            .push((level, message.to_string()));
    }
}

impl<S: NotificationSink + Sync> NotificationSink for Arc<S> {
    fn notify(&self, level: NoticeLevel, message: &str) {
        (**self).notify(level, message);
    }
}
