//! Toast Relay
//!
//! Carries the latest outcome message to the presentation layer. A newer
//! message replaces the older one, and messages expire after [`TOAST_TTL`].

use jiff::{SignedDuration, Timestamp};

use crate::outcome::Outcome;

/// How long a toast stays visible.
pub const TOAST_TTL: SignedDuration = SignedDuration::from_secs(3);

/// A message raised at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Text shown to the shopper
    pub message: String,

    /// When the toast was raised
    pub raised_at: Timestamp,
}

/// Holds at most one live toast.
#[derive(Debug, Clone, Default)]
pub struct ToastRelay {
    current: Option<Toast>,
}

impl ToastRelay {
    /// An empty relay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise `message`, replacing any visible toast. Blank messages are ignored.
    pub fn raise(&mut self, message: impl Into<String>, now: Timestamp) {
        let message = message.into();

        if message.trim().is_empty() {
            return;
        }

        self.current = Some(Toast {
            message,
            raised_at: now,
        });
    }

    /// Relay an outcome's message.
    pub fn relay(&mut self, outcome: &Outcome, now: Timestamp) {
        self.raise(outcome.message(), now);
    }

    /// The visible message at `now`, if it has not expired.
    pub fn current(&self, now: Timestamp) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|toast| now.duration_since(toast.raised_at) < TOAST_TTL)
            .map(|toast| toast.message.as_str())
    }

    /// Take the latest toast regardless of age, leaving the relay empty.
    pub fn take(&mut self) -> Option<Toast> {
        self.current.take()
    }

    /// Hide the visible toast.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
