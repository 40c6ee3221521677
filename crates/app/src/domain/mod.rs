//! Quire Domain Concerns

pub mod carts;
pub mod catalog;
pub mod chat;
pub mod content;
pub mod orders;
pub mod reviews;
pub mod wishlists;
