//! Configuration
//!
//! Argument groups shared by the command-line front end. Every option can
//! also be set through the environment or a `.env` file.

pub mod backend;
pub mod logging;
pub mod storage;

pub use backend::BackendConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use storage::StorageConfig;
