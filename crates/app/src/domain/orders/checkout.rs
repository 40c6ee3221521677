//! Order placement.
//!
//! Snapshot the cart, submit it, and clear the cart only once the store has
//! accepted the order.

use jiff::Timestamp;
use quire::{
    orders::{CustomerDetails, NewOrder, Order, OrderError},
    products::Product,
};
use thiserror::Error;
use tracing::{error, info};

use crate::domain::{
    carts::CartSession,
    orders::{OrdersService, OrdersServiceError},
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Invalid(#[from] OrderError),

    #[error("order submission failed")]
    Submission(#[source] OrdersServiceError),
}

/// Place an order for the contents of `cart`, priced against `products`.
///
/// # Errors
///
/// Returns [`CheckoutError::Invalid`] for an empty cart or blank customer
/// details and [`CheckoutError::Submission`] when the store rejects the
/// order. The cart is untouched in both cases.
pub async fn checkout(
    orders: &dyn OrdersService,
    cart: &mut CartSession,
    products: &[Product],
    customer: CustomerDetails,
    now: Timestamp,
) -> Result<Order, CheckoutError> {
    let order = NewOrder::from_ledger(
        cart.ledger(),
        products,
        customer,
        cart.identity().user_id().cloned(),
        now,
    )?;

    let placed = orders.place_order(order).await.map_err(|source| {
        error!(error = %source, "order submission failed");
        CheckoutError::Submission(source)
    })?;

    cart.clear().await;

    info!(order = %placed.id, "cart cleared after checkout");

    Ok(placed)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use quire::{
        fixtures::catalog,
        ids::Identity,
        orders::OrderStatus,
        products::ProductId,
    };
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{GUEST_CART_KEY, StoreCartsService},
            orders::{MockOrdersService, StoreOrdersService},
        },
        store::{Collection, Filter, RowStore},
        test::{MemoryLocalStorage, MemoryRowStore},
    };

    use super::*;

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Salma".to_string(),
            address: "12 Nile St".to_string(),
            phone: "0100".to_string(),
        }
    }

    fn product(products: &[Product], id: &str) -> Product {
        let Some(product) = products.iter().find(|product| product.id.as_str() == id) else {
            panic!("fixture product {id} is missing");
        };

        product.clone()
    }

    async fn two_item_cart(
        store: &Arc<MemoryRowStore>,
        local: &Arc<MemoryLocalStorage>,
        products: &[Product],
    ) -> TestResult<CartSession> {
        let mut cart = CartSession::new(
            Arc::new(StoreCartsService::new(store.clone())),
            local.clone(),
        );

        cart.initialize(Identity::Guest).await;

        assert!(cart.add(&product(products, "p1"), 1).await.is_success());
        assert!(cart.add(&product(products, "p2"), 2).await.is_success());

        Ok(cart)
    }

    #[tokio::test]
    async fn successful_checkout_snapshots_and_clears_the_cart() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());
        let products = catalog();
        let mut cart = two_item_cart(&store, &local, &products).await?;
        let snapshot = cart.ledger().items().to_vec();
        let expected_total = cart.ledger().total(&products);
        let orders = StoreOrdersService::new(store.clone());

        let order = checkout(&orders, &mut cart, &products, customer(), Timestamp::now()).await?;

        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.items, snapshot);
        assert_eq!(order.total, expected_total);
        assert_eq!(order.total, 45_00 + 2 * 120_00);
        assert!(cart.ledger().is_empty());
        assert_eq!(local.value(GUEST_CART_KEY), None);
        assert_eq!(store.rows(Collection::Orders).len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn failed_submission_leaves_the_cart_alone() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());
        let products = catalog();
        let mut cart = two_item_cart(&store, &local, &products).await?;
        let before = cart.ledger().clone();

        store.fail_writes(Collection::Orders);

        let orders = StoreOrdersService::new(store.clone());
        let result = checkout(&orders, &mut cart, &products, customer(), Timestamp::now()).await;

        assert!(
            matches!(result, Err(CheckoutError::Submission(_))),
            "expected Submission, got {result:?}"
        );
        assert_eq!(cart.ledger(), &before);
        assert_eq!(cart.ledger().len(), 2);
        assert!(local.value(GUEST_CART_KEY).is_some(), "guest cart is kept");

        Ok(())
    }

    #[tokio::test]
    async fn invalid_orders_are_never_submitted() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());
        let products = catalog();
        let mut orders = MockOrdersService::new();

        orders.expect_place_order().never();

        let mut empty = CartSession::new(
            Arc::new(StoreCartsService::new(store.clone())),
            local.clone(),
        );

        let result = checkout(&orders, &mut empty, &products, customer(), Timestamp::now()).await;

        assert!(
            matches!(result, Err(CheckoutError::Invalid(OrderError::EmptyCart))),
            "expected EmptyCart, got {result:?}"
        );

        let mut cart = two_item_cart(&store, &local, &products).await?;
        let blank_phone = CustomerDetails {
            phone: "   ".to_string(),
            ..customer()
        };

        let result = checkout(&orders, &mut cart, &products, blank_phone, Timestamp::now()).await;

        assert!(
            matches!(result, Err(CheckoutError::Invalid(OrderError::MissingDetail("phone")))),
            "expected MissingDetail, got {result:?}"
        );
        assert_eq!(cart.ledger().len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn account_orders_carry_the_user_id() -> TestResult {
        let store = Arc::new(MemoryRowStore::new());
        let local = Arc::new(MemoryLocalStorage::new());
        let products = catalog();
        let mut cart = CartSession::new(
            Arc::new(StoreCartsService::new(store.clone())),
            local.clone(),
        );

        cart.initialize(Identity::Account("u-7".into())).await;
        assert!(cart.add(&product(&products, "p4"), 1).await.is_success());

        let orders = StoreOrdersService::new(store.clone());
        let order = checkout(&orders, &mut cart, &products, customer(), Timestamp::now()).await?;

        assert_eq!(order.user_id.as_ref().map(|id| id.as_str()), Some("u-7"));
        assert!(
            store
                .select(Collection::UserCarts, Filter::eq("user_id", "u-7"))
                .await?
                .is_empty(),
            "account cart row is deleted"
        );
        assert!(!cart.ledger().contains(&ProductId::from("p4")));

        Ok(())
    }
}
