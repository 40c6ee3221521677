//! Store errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by a [`RowStore`](super::RowStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched.
    #[error("row not found")]
    NotFound,

    /// A row with the same key already exists.
    #[error("row already exists")]
    Conflict,

    /// Transport failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("unexpected response ({status}): {body}")]
    UnexpectedResponse {
        /// Response status
        status: StatusCode,

        /// Response body, for diagnostics
        body: String,
    },

    /// A row could not be converted to or from its typed form.
    #[error("malformed row: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors raised by a [`LocalStorage`](super::LocalStorage).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file or a stored value is not valid JSON.
    #[error("malformed storage contents: {0}")]
    Malformed(#[from] serde_json::Error),
}
