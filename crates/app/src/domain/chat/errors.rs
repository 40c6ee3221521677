//! Chat service errors.

use quire::chat::ChatError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ChatServiceError {
    #[error("conversation not found")]
    NotFound,

    #[error(transparent)]
    Invalid(#[from] ChatError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ChatServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            error => Self::Store(error),
        }
    }
}
