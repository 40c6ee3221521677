//! Wishlists

pub mod errors;
pub mod service;
pub mod session;

pub use errors::WishlistsServiceError;
pub use service::*;
pub use session::{GUEST_WISHLIST_KEY, WishlistSession};
