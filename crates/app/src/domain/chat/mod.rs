//! Support Chat

pub mod errors;
pub mod service;

pub use errors::ChatServiceError;
pub use service::*;
