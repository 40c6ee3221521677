//! Site Content

pub mod errors;
pub mod service;

pub use errors::ContentServiceError;
pub use service::*;
