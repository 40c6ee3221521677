//! Quire application: the persistence boundary, backend adapters, domain
//! services, cart and wishlist sessions, and the storefront context that
//! ties them to the engine.

pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod store;
pub mod storefront;

#[cfg(test)]
mod test;
