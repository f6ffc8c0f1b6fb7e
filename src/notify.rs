//! User-visible notifications
//!
//! Warnings and errors raised during an interaction are shown to the user as
//! they happen. They are neither queued nor deduplicated.
//!
//! [`RecordingNotifier`] is a test double. It is public so the integration
//! tests under `tests/` can assert on the exact messages a cycle produced.

use std::sync::Mutex;

/// Shown for every rate-limited attempt
pub const RATE_LIMIT_WARNING: &str = "Too many requests. Waiting before retrying...";

/// Shown when the fetch returned nothing to chart
pub const NO_DATA_WARNING: &str = "No data found for the selected keywords and time range.";

/// Shown while a fetch is in flight
pub const FETCHING_MESSAGE: &str = "Fetching trend data...";

/// Sink for user-visible messages
pub trait Notifier {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes notifications to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        eprintln!("{message}");
    }

    fn warning(&self, message: &str) {
        eprintln!("warning: {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// One recorded notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Warning(String),
    Error(String),
}

/// Keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Notification::Warning(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Notification::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Notification) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.push(Notification::Info(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.push(Notification::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }
}
