//! Orders

pub mod checkout;
pub mod errors;
pub mod service;

pub use checkout::{CheckoutError, checkout};
pub use errors::OrdersServiceError;
pub use service::*;
