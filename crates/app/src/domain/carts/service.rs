//! Carts service.
//!
//! Remote persistence for account carts: one row per account, upserted
//! wholesale. Last write wins.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use quire::{cart::CartItem, ids::UserId};

use crate::{
    domain::carts::{errors::CartsServiceError, records::CartRecord},
    store::{Collection, Filter, RowStore, decode, encode},
};

const USER_KEY: &str = "user_id";

#[derive(Clone)]
pub struct StoreCartsService {
    store: Arc<dyn RowStore>,
}

impl StoreCartsService {
    #[must_use]
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CartsService for StoreCartsService {
    async fn load_cart(&self, user: UserId) -> Result<Option<Vec<CartItem>>, CartsServiceError> {
        let rows = self
            .store
            .select(
                Collection::UserCarts,
                Filter::eq(USER_KEY, user.as_str()).limit(1),
            )
            .await?;

        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let record: CartRecord = decode(row)?;

        Ok(Some(record.items))
    }

    async fn save_cart(&self, user: UserId, items: Vec<CartItem>) -> Result<(), CartsServiceError> {
        let record = CartRecord {
            user_id: user,
            items,
        };

        self.store
            .upsert(Collection::UserCarts, encode(&record)?, USER_KEY)
            .await?;

        Ok(())
    }

    async fn delete_cart(&self, user: UserId) -> Result<(), CartsServiceError> {
        self.store
            .delete(Collection::UserCarts, Filter::eq(USER_KEY, user.as_str()))
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The account's persisted cart lines, `None` when it has never saved
    /// one.
    async fn load_cart(&self, user: UserId) -> Result<Option<Vec<CartItem>>, CartsServiceError>;

    /// Replace the account's persisted cart.
    async fn save_cart(&self, user: UserId, items: Vec<CartItem>) -> Result<(), CartsServiceError>;

    /// Forget the account's persisted cart. Deleting an absent cart is not
    /// an error.
    async fn delete_cart(&self, user: UserId) -> Result<(), CartsServiceError>;
}
