//! Storefront
//!
//! The session-scoped state a shopper or admin works against: the loaded
//! catalog and its search index, cart and wishlist sessions, and the toast
//! relay every operation reports to. Built explicitly by [`Storefront::load`]
//! and passed to whatever handles user actions.

use jiff::Timestamp;
use quire::{
    cart::CartLedger,
    catalog::CatalogIndex,
    content::SiteContent,
    ids::Identity,
    orders::Order,
    outcome::Outcome,
    products::{Category, Product, ProductId, SubCategory},
    reviews::Review,
    toasts::{Toast, ToastRelay},
    wishlist::WishlistSet,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    context::AppContext,
    domain::{
        carts::CartSession,
        catalog::CatalogServiceError,
        content::ContentServiceError,
        orders::OrdersServiceError,
        reviews::ReviewsServiceError,
        wishlists::WishlistSession,
    },
};

mod admin;
mod shopping;

/// Failures while fetching the initial data set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Catalog(#[from] CatalogServiceError),

    #[error(transparent)]
    Reviews(#[from] ReviewsServiceError),

    #[error(transparent)]
    Content(#[from] ContentServiceError),

    #[error(transparent)]
    Orders(#[from] OrdersServiceError),
}

/// Everything fetched at start-up.
#[derive(Debug, Default)]
struct Snapshot {
    products: Vec<Product>,
    categories: Vec<Category>,
    sub_categories: Vec<SubCategory>,
    reviews: Vec<Review>,
    content: SiteContent,
    orders: Vec<Order>,
}

pub struct Storefront {
    context: AppContext,
    identity: Identity,
    user_name: String,
    index: CatalogIndex,
    categories: Vec<Category>,
    sub_categories: Vec<SubCategory>,
    reviews: Vec<Review>,
    orders: Vec<Order>,
    content: SiteContent,
    cart: CartSession,
    wishlist: WishlistSession,
    toasts: ToastRelay,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("identity", &self.identity)
            .field("products", &self.index.products().len())
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Fetch the catalog, reviews, site content and the account's orders,
    /// then initialise the cart and wishlist for `identity`.
    ///
    /// A failed fetch leaves an empty catalog with default site content and
    /// raises a toast; the cart and wishlist are initialised either way.
    pub async fn load(context: AppContext, identity: Identity, user_name: impl Into<String>) -> Self {
        let mut toasts = ToastRelay::new();

        let snapshot = match fetch(&context, &identity).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "failed to load storefront data");
                toasts.raise(
                    format!("Couldn't load data from the server. {error}"),
                    Timestamp::now(),
                );

                Snapshot::default()
            }
        };

        let mut cart = CartSession::new(context.carts.clone(), context.local.clone());
        let mut wishlist = WishlistSession::new(context.wishlists.clone(), context.local.clone());

        cart.initialize(identity.clone()).await;
        wishlist.initialize(identity.clone()).await;

        info!(
            identity = ?identity,
            products = snapshot.products.len(),
            cart_lines = cart.ledger().len(),
            "storefront loaded"
        );

        Self {
            context,
            identity,
            user_name: user_name.into(),
            index: CatalogIndex::new(snapshot.products),
            categories: snapshot.categories,
            sub_categories: snapshot.sub_categories,
            reviews: snapshot.reviews,
            orders: snapshot.orders,
            content: snapshot.content,
            cart,
            wishlist,
            toasts,
        }
    }

    /// Who the session belongs to.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Searchable catalog.
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Loaded products, in catalog order.
    pub fn products(&self) -> &[Product] {
        self.index.products()
    }

    /// Product by id.
    pub fn product(&self, product_id: &ProductId) -> Option<&Product> {
        self.products().iter().find(|product| &product.id == product_id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn sub_categories(&self) -> &[SubCategory] {
        &self.sub_categories
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// The signed-in account's orders, newest first. Empty for guests.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn cart(&self) -> &CartLedger {
        self.cart.ledger()
    }

    /// Cart lines joined with their products. Lines whose product is no
    /// longer in the catalog are skipped.
    pub fn cart_lines(&self) -> Vec<(&Product, u32)> {
        self.cart
            .ledger()
            .items()
            .iter()
            .filter_map(|item| {
                self.product(&item.product_id)
                    .map(|product| (product, item.quantity))
            })
            .collect()
    }

    /// Cart total in minor units.
    pub fn cart_total(&self) -> u64 {
        self.cart.ledger().total(self.products())
    }

    pub fn wishlist(&self) -> &WishlistSet {
        self.wishlist.set()
    }

    /// Take the latest toast, leaving the relay empty.
    pub fn take_toast(&mut self) -> Option<Toast> {
        self.toasts.take()
    }

    fn relay(&mut self, outcome: Outcome) -> Outcome {
        self.toasts.relay(&outcome, Timestamp::now());

        outcome
    }

    fn rebuild_index(&mut self, products: Vec<Product>) {
        self.index = CatalogIndex::new(products);
    }
}

async fn fetch(context: &AppContext, identity: &Identity) -> Result<Snapshot, LoadError> {
    let orders = async {
        match identity.user_id() {
            Some(user) => context.orders.list_orders_for_user(user.clone()).await,
            None => Ok(Vec::new()),
        }
    };

    let (products, categories, sub_categories, reviews, content, orders) = tokio::try_join!(
        async { context.catalog.list_products().await.map_err(LoadError::from) },
        async { context.catalog.list_categories().await.map_err(LoadError::from) },
        async { context.catalog.list_sub_categories().await.map_err(LoadError::from) },
        async { context.reviews.list_reviews().await.map_err(LoadError::from) },
        async { context.content.get_content().await.map_err(LoadError::from) },
        async { orders.await.map_err(LoadError::from) },
    )?;

    Ok(Snapshot {
        products,
        categories,
        sub_categories,
        reviews,
        content,
        orders,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use quire::fixtures::{catalog, categories, sub_categories};
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::GUEST_CART_KEY,
            catalog::{CatalogService, CatalogServiceError, MockCatalogService},
        },
        store::{Collection, LocalStorage, encode},
        test::{MemoryLocalStorage, MemoryRowStore},
    };

    use super::*;

    /// A row store seeded with the fixture catalog.
    pub(crate) fn seeded_store() -> TestResult<Arc<MemoryRowStore>> {
        let store = Arc::new(MemoryRowStore::new());

        store.seed(
            Collection::Products,
            catalog().iter().map(encode).collect::<Result<_, _>>()?,
        );
        store.seed(
            Collection::Categories,
            categories().iter().map(encode).collect::<Result<_, _>>()?,
        );
        store.seed(
            Collection::SubCategories,
            sub_categories().iter().map(encode).collect::<Result<_, _>>()?,
        );

        Ok(store)
    }

    pub(crate) async fn storefront(
        store: &Arc<MemoryRowStore>,
        local: &Arc<MemoryLocalStorage>,
        identity: Identity,
    ) -> Storefront {
        let context = AppContext::from_store(store.clone(), local.clone());

        Storefront::load(context, identity, "Salma").await
    }

    #[tokio::test]
    async fn load_fetches_the_catalog_and_initialises_the_cart() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());

        local
            .set(GUEST_CART_KEY, r#"[{"productId":"p2","quantity":2}]"#.to_string())
            .await?;

        let mut storefront = storefront(&store, &local, Identity::Guest).await;

        assert_eq!(storefront.products().len(), catalog().len());
        assert_eq!(storefront.categories().len(), categories().len());
        assert_eq!(storefront.cart().quantity(&"p2".into()), 2);
        assert_eq!(storefront.cart_total(), 2 * 120_00);
        assert_eq!(storefront.content(), &SiteContent::default());
        assert!(storefront.orders().is_empty(), "guests have no orders");
        assert_eq!(storefront.take_toast(), None);

        Ok(())
    }

    #[tokio::test]
    async fn failed_load_falls_back_and_raises_a_toast() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());
        let mut context = AppContext::from_store(store.clone(), local.clone());
        let mut catalog_service = MockCatalogService::new();

        catalog_service
            .expect_list_products()
            .returning(|| Err(CatalogServiceError::NotFound));
        catalog_service
            .expect_list_categories()
            .returning(|| Ok(Vec::new()));
        catalog_service
            .expect_list_sub_categories()
            .returning(|| Ok(Vec::new()));

        context.catalog = Arc::new(catalog_service) as Arc<dyn CatalogService>;

        local
            .set(GUEST_CART_KEY, r#"[{"productId":"p1","quantity":1}]"#.to_string())
            .await?;

        let mut storefront = Storefront::load(context, Identity::Guest, "Salma").await;

        assert!(storefront.products().is_empty());
        assert_eq!(storefront.content(), &SiteContent::default());
        assert_eq!(storefront.cart().len(), 1, "cart still initialises");

        let Some(toast) = storefront.take_toast() else {
            panic!("a failed load raises a toast");
        };

        assert!(
            toast.message.starts_with("Couldn't load data from the server."),
            "unexpected toast: {}",
            toast.message
        );

        Ok(())
    }

    #[tokio::test]
    async fn cart_lines_skip_products_missing_from_the_catalog() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());

        local
            .set(
                GUEST_CART_KEY,
                r#"[{"productId":"p1","quantity":1},{"productId":"gone","quantity":3}]"#
                    .to_string(),
            )
            .await?;

        let storefront = storefront(&store, &local, Identity::Guest).await;

        let lines: Vec<(&str, u32)> = storefront
            .cart_lines()
            .into_iter()
            .map(|(product, quantity)| (product.id.as_str(), quantity))
            .collect();

        assert_eq!(lines, [("p1", 1)]);

        Ok(())
    }
}
