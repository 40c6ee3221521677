//! Cart session.
//!
//! Pairs a [`CartLedger`] with the store that persists it: local storage for
//! guests, the carts service for accounts. Every successful mutation ends
//! with an explicit save of the whole ledger. Save failures are logged and
//! never roll back the in-memory change.

use std::sync::Arc;

use quire::{
    cart::{CartItem, CartLedger},
    ids::{Identity, UserId},
    outcome::Outcome,
    products::{Product, ProductId},
};
use tracing::{debug, info, warn};

use crate::{domain::carts::CartsService, store::LocalStorage};

/// Local storage key of the guest cart.
pub const GUEST_CART_KEY: &str = "stationery_guest_cart";

pub struct CartSession {
    carts: Arc<dyn CartsService>,
    local: Arc<dyn LocalStorage>,
    identity: Identity,
    ledger: CartLedger,
    initialized: bool,
}

impl std::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("identity", &self.identity)
            .field("ledger", &self.ledger)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl CartSession {
    /// An uninitialised guest session with an empty ledger.
    pub fn new(carts: Arc<dyn CartsService>, local: Arc<dyn LocalStorage>) -> Self {
        Self {
            carts,
            local,
            identity: Identity::Guest,
            ledger: CartLedger::new(),
            initialized: false,
        }
    }

    /// Current ledger.
    pub fn ledger(&self) -> &CartLedger {
        &self.ledger
    }

    /// Who the ledger is persisted for.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Whether [`initialize`](Self::initialize) has run for the current
    /// identity.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Load the ledger for `identity`. Runs once per identity; later calls
    /// with the same identity are no-ops.
    ///
    /// Guests get the guest ledger from local storage. Accounts get their
    /// remote ledger, with any guest ledger summed into it, written back and
    /// then cleared from local storage. When the remote read fails the
    /// ledger is left empty, nothing is written for the account and the next
    /// call retries.
    pub async fn initialize(&mut self, identity: Identity) {
        if self.initialized && self.identity == identity {
            return;
        }

        self.identity = identity;

        self.initialized = match self.identity.user_id().cloned() {
            Some(user) => self.merge_and_sync(user).await,
            None => {
                self.ledger = self.guest_ledger().await;
                true
            }
        };

        debug!(
            identity = ?self.identity,
            lines = self.ledger.len(),
            "cart initialized"
        );
    }

    /// Add units of `product`, then persist.
    pub async fn add(&mut self, product: &Product, quantity: u32) -> Outcome {
        let outcome = self.ledger.add(product, quantity);

        self.persist_if(&outcome).await;

        outcome
    }

    /// Set a line's quantity exactly, then persist.
    pub async fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        stock: u32,
    ) -> Outcome {
        let outcome = self.ledger.update_quantity(product_id, quantity, stock);

        self.persist_if(&outcome).await;

        outcome
    }

    /// Remove a line, then persist.
    pub async fn remove(&mut self, product_id: &ProductId, product_name: &str) -> Outcome {
        let outcome = self.ledger.remove(product_id, product_name);

        self.persist_if(&outcome).await;

        outcome
    }

    /// Empty the ledger and delete its persisted copy.
    pub async fn clear(&mut self) {
        self.ledger.clear();

        match self.identity.user_id() {
            Some(_) if !self.initialized => {
                debug!("account cart not loaded, skipping delete");
            }
            Some(user) => {
                if let Err(error) = self.carts.delete_cart(user.clone()).await {
                    warn!(%user, %error, "failed to delete account cart");
                }
            }
            None => {
                if let Err(error) = self.local.remove(GUEST_CART_KEY).await {
                    warn!(%error, "failed to delete guest cart");
                }
            }
        }
    }

    /// Whether the account ledger was loaded.
    async fn merge_and_sync(&mut self, user: UserId) -> bool {
        let remote = match self.carts.load_cart(user.clone()).await {
            Ok(items) => CartLedger::from_items(items.unwrap_or_default()),
            Err(error) => {
                warn!(%user, %error, "failed to load account cart");
                self.ledger = CartLedger::new();
                return false;
            }
        };

        let guest = self.guest_ledger().await;

        if guest.is_empty() {
            self.ledger = remote;
            return true;
        }

        let mut merged = remote;
        merged.merge(&guest);
        self.ledger = merged;

        info!(%user, guest_lines = guest.len(), "merging guest cart into account cart");

        if let Err(error) = self
            .carts
            .save_cart(user.clone(), self.ledger.items().to_vec())
            .await
        {
            warn!(%user, %error, "failed to save merged cart, keeping guest cart");
            return true;
        }

        if let Err(error) = self.local.remove(GUEST_CART_KEY).await {
            warn!(%error, "failed to clear guest cart after merge");
        }

        true
    }

    async fn guest_ledger(&self) -> CartLedger {
        let stored = match self.local.get(GUEST_CART_KEY).await {
            Ok(stored) => stored,
            Err(error) => {
                warn!(%error, "failed to read guest cart");
                return CartLedger::new();
            }
        };

        let Some(stored) = stored else {
            return CartLedger::new();
        };

        match serde_json::from_str::<Vec<CartItem>>(&stored) {
            Ok(items) => CartLedger::from_items(items),
            Err(error) => {
                warn!(%error, "ignoring malformed guest cart");
                CartLedger::new()
            }
        }
    }

    async fn persist_if(&self, outcome: &Outcome) {
        if outcome.is_success() {
            self.persist().await;
        }
    }

    async fn persist(&self) {
        let items = self.ledger.items().to_vec();

        match self.identity.user_id() {
            Some(_) if !self.initialized => {
                debug!("account cart not loaded, skipping save");
            }
            Some(user) => {
                if let Err(error) = self.carts.save_cart(user.clone(), items).await {
                    warn!(%user, %error, "failed to save account cart");
                }
            }
            None => {
                let saved = match serde_json::to_string(&items) {
                    Ok(json) => self.local.set(GUEST_CART_KEY, json).await,
                    Err(error) => Err(error.into()),
                };

                if let Err(error) = saved {
                    warn!(%error, "failed to save guest cart");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use quire::fixtures::ProductBuilder;
    use testresult::TestResult;

    use crate::{
        domain::carts::{CartsServiceError, MockCartsService, StoreCartsService},
        store::{Collection, StoreError},
        test::{MemoryLocalStorage, MemoryRowStore},
    };

    use super::*;

    fn item(product: &str, quantity: u32) -> CartItem {
        CartItem {
            product_id: product.into(),
            quantity,
        }
    }

    fn guest_json(items: &[CartItem]) -> TestResult<String> {
        Ok(serde_json::to_string(items)?)
    }

    fn session_with(store: &Arc<MemoryRowStore>, local: &Arc<MemoryLocalStorage>) -> CartSession {
        CartSession::new(
            Arc::new(StoreCartsService::new(store.clone())),
            local.clone(),
        )
    }

    #[tokio::test]
    async fn guest_initialize_loads_local_ledger() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());

        local
            .set(GUEST_CART_KEY, guest_json(&[item("p1", 2)])?)
            .await?;

        let mut session = session_with(&store, &local);
        session.initialize(Identity::Guest).await;

        assert_eq!(session.ledger().items(), [item("p1", 2)]);
        assert!(session.is_initialized());

        Ok(())
    }

    #[tokio::test]
    async fn login_merges_guest_into_account_additively() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());
        let carts = StoreCartsService::new(store.clone());

        carts.save_cart("u-1".into(), vec![item("A", 2)]).await?;
        local
            .set(GUEST_CART_KEY, guest_json(&[item("A", 3), item("B", 1)])?)
            .await?;

        let mut session = session_with(&store, &local);
        session.initialize(Identity::Account("u-1".into())).await;

        assert_eq!(session.ledger().items(), [item("A", 5), item("B", 1)]);
        assert_eq!(local.value(GUEST_CART_KEY), None, "guest cart is cleared");
        assert_eq!(
            carts.load_cart("u-1".into()).await?,
            Some(vec![item("A", 5), item("B", 1)]),
            "merged ledger is written back"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_without_remote_cart_adopts_guest_cart() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());
        let guest = [item("p1", 1), item("p4", 2)];

        local.set(GUEST_CART_KEY, guest_json(&guest)?).await?;

        let mut session = session_with(&store, &local);
        session.initialize(Identity::Account("u-1".into())).await;

        assert_eq!(session.ledger().items(), guest);
        assert_eq!(local.value(GUEST_CART_KEY), None);

        Ok(())
    }

    #[tokio::test]
    async fn login_with_empty_guest_cart_adopts_remote_without_writing() -> TestResult {
        let local = Arc::new(MemoryLocalStorage::new());
        let mut carts = MockCartsService::new();

        carts
            .expect_load_cart()
            .once()
            .withf(|user| user.as_str() == "u-1")
            .return_once(|_| Ok(Some(vec![item("p2", 4)])));
        carts.expect_save_cart().never();

        let mut session = CartSession::new(Arc::new(carts), local);
        session.initialize(Identity::Account("u-1".into())).await;

        assert_eq!(session.ledger().items(), [item("p2", 4)]);

        Ok(())
    }

    #[tokio::test]
    async fn remote_read_failure_keeps_guest_cart() -> TestResult {
        let local = Arc::new(MemoryLocalStorage::new());
        let mut carts = MockCartsService::new();

        local
            .set(GUEST_CART_KEY, guest_json(&[item("p1", 1)])?)
            .await?;

        carts.expect_load_cart().once().return_once(|_| {
            Err(CartsServiceError::Store(StoreError::UnexpectedResponse {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: String::new(),
            }))
        });
        carts.expect_save_cart().never();

        let mut session = CartSession::new(Arc::new(carts), local.clone());
        session.initialize(Identity::Account("u-1".into())).await;

        assert!(!session.is_initialized(), "the next initialize retries");
        assert!(session.ledger().is_empty());
        assert!(local.value(GUEST_CART_KEY).is_some(), "guest cart survives");

        Ok(())
    }

    #[tokio::test]
    async fn guest_lines_never_reach_an_account_whose_cart_failed_to_load() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());
        let notebook = ProductBuilder::new("A", "Notebook").stock(5).build();
        let pen = ProductBuilder::new("B", "Pen").stock(5).build();
        let mut carts = MockCartsService::new();

        carts.expect_load_cart().once().return_once(|_| {
            Err(CartsServiceError::Store(StoreError::UnexpectedResponse {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: String::new(),
            }))
        });
        carts.expect_save_cart().never();
        carts.expect_delete_cart().never();

        let mut guest = session_with(&store, &local);
        guest.initialize(Identity::Guest).await;
        assert!(guest.add(&notebook, 2).await.is_success());

        let mut session = CartSession {
            carts: Arc::new(carts),
            ..guest
        };
        session.initialize(Identity::Account("u-1".into())).await;

        assert!(session.ledger().is_empty(), "guest lines are not carried over");

        assert!(session.add(&pen, 1).await.is_success());
        session.clear().await;

        assert_eq!(
            local.value(GUEST_CART_KEY),
            Some(guest_json(&[item("A", 2)])?),
            "guest cart is kept for the next successful login"
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_account_load_is_retried() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());
        let carts = StoreCartsService::new(store.clone());

        carts.save_cart("u-1".into(), vec![item("A", 1)]).await?;
        local
            .set(GUEST_CART_KEY, guest_json(&[item("A", 2)])?)
            .await?;

        let mut failing = MockCartsService::new();

        failing.expect_load_cart().once().return_once(|_| {
            Err(CartsServiceError::Store(StoreError::UnexpectedResponse {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: String::new(),
            }))
        });

        let mut session = CartSession::new(Arc::new(failing), local.clone());
        session.initialize(Identity::Account("u-1".into())).await;

        let mut session = CartSession {
            carts: Arc::new(StoreCartsService::new(store.clone())),
            ..session
        };
        session.initialize(Identity::Account("u-1".into())).await;

        assert!(session.is_initialized());
        assert_eq!(session.ledger().items(), [item("A", 3)], "guest lines merged once");
        assert_eq!(carts.load_cart("u-1".into()).await?, Some(vec![item("A", 3)]));
        assert_eq!(local.value(GUEST_CART_KEY), None);

        Ok(())
    }

    #[tokio::test]
    async fn initialize_runs_once_per_identity() -> TestResult {
        let local = Arc::new(MemoryLocalStorage::new());
        let mut carts = MockCartsService::new();

        carts
            .expect_load_cart()
            .once()
            .return_once(|_| Ok(None));

        let mut session = CartSession::new(Arc::new(carts), local);
        session.initialize(Identity::Account("u-1".into())).await;
        session.initialize(Identity::Account("u-1".into())).await;

        Ok(())
    }

    #[tokio::test]
    async fn guest_mutations_persist_locally() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());
        let pen = ProductBuilder::new("p1", "Pen").stock(5).build();

        let mut session = session_with(&store, &local);
        session.initialize(Identity::Guest).await;

        assert!(session.add(&pen, 2).await.is_success());
        assert_eq!(
            local.value(GUEST_CART_KEY).as_deref(),
            Some(r#"[{"productId":"p1","quantity":2}]"#)
        );

        assert!(!session.add(&pen, 4).await.is_success());
        assert_eq!(
            local.value(GUEST_CART_KEY).as_deref(),
            Some(r#"[{"productId":"p1","quantity":2}]"#),
            "failed adds leave storage alone"
        );

        assert!(session.update_quantity(&pen.id, 0, 5).await.is_success());
        assert_eq!(local.value(GUEST_CART_KEY).as_deref(), Some("[]"));

        Ok(())
    }

    #[tokio::test]
    async fn account_mutations_upsert_the_whole_ledger() -> TestResult {
        let local = Arc::new(MemoryLocalStorage::new());
        let pen = ProductBuilder::new("p1", "Pen").stock(5).build();
        let mut carts = MockCartsService::new();

        carts.expect_load_cart().once().return_once(|_| Ok(None));
        carts
            .expect_save_cart()
            .once()
            .withf(|user, items| user.as_str() == "u-1" && items == &[item("p1", 3)])
            .return_once(|_, _| Ok(()));

        let mut session = CartSession::new(Arc::new(carts), local.clone());
        session.initialize(Identity::Account("u-1".into())).await;

        assert!(session.add(&pen, 3).await.is_success());
        assert_eq!(local.value(GUEST_CART_KEY), None, "account carts never touch local storage");

        Ok(())
    }

    #[tokio::test]
    async fn save_failures_keep_the_in_memory_change() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());
        let pen = ProductBuilder::new("p1", "Pen").stock(5).build();

        store.fail_writes(Collection::UserCarts);

        let mut session = session_with(&store, &local);
        session.initialize(Identity::Account("u-1".into())).await;

        assert!(session.add(&pen, 1).await.is_success());
        assert_eq!(session.ledger().quantity(&pen.id), 1);

        Ok(())
    }

    #[tokio::test]
    async fn clear_deletes_the_persisted_copy() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());
        let pen = ProductBuilder::new("p1", "Pen").stock(5).build();

        let mut session = session_with(&store, &local);
        session.initialize(Identity::Guest).await;

        let _added = session.add(&pen, 1).await;
        session.clear().await;

        assert!(session.ledger().is_empty());
        assert_eq!(local.value(GUEST_CART_KEY), None);

        Ok(())
    }
}
