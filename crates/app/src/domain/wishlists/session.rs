//! Wishlist session.
//!
//! The wishlist follows the cart's guest/account split without the merge:
//! a signed-in session loads the account's wishlist and ignores any guest
//! wishlist, which stays on the device untouched.

use std::sync::Arc;

use quire::{
    ids::Identity,
    outcome::Outcome,
    products::ProductId,
    wishlist::WishlistSet,
};
use tracing::{debug, warn};

use crate::{domain::wishlists::WishlistsService, store::LocalStorage};

/// Local storage key of the guest wishlist.
pub const GUEST_WISHLIST_KEY: &str = "stationery_guest_wishlist";

pub struct WishlistSession {
    wishlists: Arc<dyn WishlistsService>,
    local: Arc<dyn LocalStorage>,
    identity: Identity,
    set: WishlistSet,
    initialized: bool,
}

impl std::fmt::Debug for WishlistSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistSession")
            .field("identity", &self.identity)
            .field("set", &self.set)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl WishlistSession {
    /// An uninitialised guest session with an empty wishlist.
    pub fn new(wishlists: Arc<dyn WishlistsService>, local: Arc<dyn LocalStorage>) -> Self {
        Self {
            wishlists,
            local,
            identity: Identity::Guest,
            set: WishlistSet::new(),
            initialized: false,
        }
    }

    /// Current wishlist.
    pub fn set(&self) -> &WishlistSet {
        &self.set
    }

    /// Load the wishlist for `identity`, once per identity. A failed account
    /// read leaves the wishlist empty and unsaved until a later call loads it.
    pub async fn initialize(&mut self, identity: Identity) {
        if self.initialized && self.identity == identity {
            return;
        }

        self.identity = identity;

        let loaded = match self.identity.user_id() {
            Some(user) => match self.wishlists.load_wishlist(user.clone()).await {
                Ok(ids) => Some(ids.unwrap_or_default()),
                Err(error) => {
                    warn!(%user, %error, "failed to load account wishlist");
                    None
                }
            },
            None => Some(self.guest_ids().await),
        };

        self.initialized = loaded.is_some();
        self.set = WishlistSet::from_ids(loaded.unwrap_or_default());

        debug!(identity = ?self.identity, items = self.set.len(), "wishlist initialized");
    }

    /// Flip membership of `product_id`, then persist.
    pub async fn toggle(&mut self, product_id: &ProductId) -> Outcome {
        let outcome = self.set.toggle(product_id);

        self.persist().await;

        outcome
    }

    /// Drop `product_id` if present, persisting when anything changed.
    pub async fn remove(&mut self, product_id: &ProductId) -> bool {
        let removed = self.set.remove(product_id);

        if removed {
            self.persist().await;
        }

        removed
    }

    async fn guest_ids(&self) -> Vec<ProductId> {
        let stored = match self.local.get(GUEST_WISHLIST_KEY).await {
            Ok(stored) => stored,
            Err(error) => {
                warn!(%error, "failed to read guest wishlist");
                return Vec::new();
            }
        };

        stored
            .map(|json| {
                serde_json::from_str(&json).unwrap_or_else(|error| {
                    warn!(%error, "ignoring malformed guest wishlist");
                    Vec::new()
                })
            })
            .unwrap_or_default()
    }

    async fn persist(&self) {
        let ids = self.set.ids().to_vec();

        match self.identity.user_id() {
            Some(_) if !self.initialized => {
                debug!("account wishlist not loaded, skipping save");
            }
            Some(user) => {
                if let Err(error) = self.wishlists.save_wishlist(user.clone(), ids).await {
                    warn!(%user, %error, "failed to save account wishlist");
                }
            }
            None => {
                let saved = match serde_json::to_string(&ids) {
                    Ok(json) => self.local.set(GUEST_WISHLIST_KEY, json).await,
                    Err(error) => Err(error.into()),
                };

                if let Err(error) = saved {
                    warn!(%error, "failed to save guest wishlist");
                }
            }
        }
    }
}
