//! Wishlists service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use quire::{ids::UserId, products::ProductId};
use serde::{Deserialize, Serialize};

use crate::{
    domain::wishlists::errors::WishlistsServiceError,
    store::{Collection, Filter, RowStore, decode, encode},
};

const USER_KEY: &str = "user_id";

/// One account's persisted wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistRecord {
    /// Owning account
    pub user_id: UserId,

    /// Wished-for products
    #[serde(default)]
    pub items: Vec<ProductId>,
}

#[derive(Clone)]
pub struct StoreWishlistsService {
    store: Arc<dyn RowStore>,
}

impl StoreWishlistsService {
    #[must_use]
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WishlistsService for StoreWishlistsService {
    async fn load_wishlist(
        &self,
        user: UserId,
    ) -> Result<Option<Vec<ProductId>>, WishlistsServiceError> {
        let rows = self
            .store
            .select(
                Collection::UserWishlists,
                Filter::eq(USER_KEY, user.as_str()).limit(1),
            )
            .await?;

        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let record: WishlistRecord = decode(row)?;

        Ok(Some(record.items))
    }

    async fn save_wishlist(
        &self,
        user: UserId,
        items: Vec<ProductId>,
    ) -> Result<(), WishlistsServiceError> {
        let record = WishlistRecord {
            user_id: user,
            items,
        };

        self.store
            .upsert(Collection::UserWishlists, encode(&record)?, USER_KEY)
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait WishlistsService: Send + Sync {
    /// The account's persisted wishlist, `None` when it has never saved one.
    async fn load_wishlist(
        &self,
        user: UserId,
    ) -> Result<Option<Vec<ProductId>>, WishlistsServiceError>;

    /// Replace the account's persisted wishlist.
    async fn save_wishlist(
        &self,
        user: UserId,
        items: Vec<ProductId>,
    ) -> Result<(), WishlistsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::MemoryRowStore;

    use super::*;

    #[tokio::test]
    async fn saved_wishlists_load_back_per_account() -> TestResult {
        let service = StoreWishlistsService::new(Arc::new(MemoryRowStore::new()));

        service
            .save_wishlist("u-1".into(), vec!["p1".into(), "p2".into()])
            .await?;
        service.save_wishlist("u-1".into(), vec!["p2".into()]).await?;

        assert_eq!(
            service.load_wishlist("u-1".into()).await?,
            Some(vec!["p2".into()])
        );
        assert_eq!(service.load_wishlist("u-2".into()).await?, None);

        Ok(())
    }
}
