//! Outcomes
//!
//! User-facing operations report validation failures as values rather than
//! errors: an [`Outcome`] carries a success flag and a message ready to be
//! shown to the shopper.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Result of a user-facing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Outcome {
    success: bool,
    message: String,
}

impl Outcome {
    /// A successful outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed outcome; state was left untouched.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The human-readable message. May be empty for silent successes.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.message)
    }
}
