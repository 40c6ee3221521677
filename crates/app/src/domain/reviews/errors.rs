//! Reviews service errors.

use quire::reviews::ReviewError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    #[error("review not found")]
    NotFound,

    #[error(transparent)]
    Invalid(#[from] ReviewError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ReviewsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            error => Self::Store(error),
        }
    }
}
