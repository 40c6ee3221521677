//! Content service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ContentServiceError {
    #[error("storage error")]
    Store(#[from] StoreError),
}
