//! Carts

pub mod errors;
pub mod records;
pub mod service;
pub mod session;

pub use errors::CartsServiceError;
pub use service::*;
pub use session::{CartSession, GUEST_CART_KEY};
