//! Quire
//!
//! Quire is the state engine behind a stationery storefront: catalog search and
//! filtering, the cart and wishlist ledgers, order snapshots, homepage content
//! and back-office statistics. Everything here is synchronous and free of I/O.

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod content;
pub mod dashboard;
pub mod fixtures;
pub mod ids;
pub mod money;
pub mod orders;
pub mod outcome;
pub mod prelude;
pub mod products;
pub mod reviews;
pub mod toasts;
pub mod wishlist;
