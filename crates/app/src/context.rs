//! App Context

use std::sync::Arc;

use crate::{
    config::{BackendConfig, StorageConfig},
    domain::{
        carts::{CartsService, StoreCartsService},
        catalog::{CatalogService, StoreCatalogService},
        chat::{ChatService, StoreChatService},
        content::{ContentService, StoreContentService},
        orders::{OrdersService, StoreOrdersService},
        reviews::{ReviewsService, StoreReviewsService},
        wishlists::{StoreWishlistsService, WishlistsService},
    },
    store::{FileLocalStorage, LocalStorage, RestRowStore, RowStore},
};

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub orders: Arc<dyn OrdersService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub content: Arc<dyn ContentService>,
    pub chat: Arc<dyn ChatService>,
    pub carts: Arc<dyn CartsService>,
    pub wishlists: Arc<dyn WishlistsService>,
    pub local: Arc<dyn LocalStorage>,
}

impl AppContext {
    /// Build every service over one row store.
    pub fn from_store(store: Arc<dyn RowStore>, local: Arc<dyn LocalStorage>) -> Self {
        Self {
            catalog: Arc::new(StoreCatalogService::new(store.clone())),
            orders: Arc::new(StoreOrdersService::new(store.clone())),
            reviews: Arc::new(StoreReviewsService::new(store.clone())),
            content: Arc::new(StoreContentService::new(store.clone())),
            chat: Arc::new(StoreChatService::new(store.clone())),
            carts: Arc::new(StoreCartsService::new(store.clone())),
            wishlists: Arc::new(StoreWishlistsService::new(store)),
            local,
        }
    }

    /// Build application context for the hosted backend, with guest state
    /// kept in the configured data directory.
    pub fn from_config(backend: &BackendConfig, storage: &StorageConfig) -> Self {
        Self::from_store(
            Arc::new(RestRowStore::new(backend.rest())),
            Arc::new(FileLocalStorage::in_dir(&storage.data_dir)),
        )
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
