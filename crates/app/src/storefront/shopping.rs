//! Shopper operations.

use jiff::Timestamp;
use quire::{
    orders::{CustomerDetails, Order, OrderId},
    outcome::Outcome,
    products::ProductId,
    reviews::NewReview,
};
use tracing::warn;

use crate::domain::orders::{CheckoutError, checkout};

use super::Storefront;

const PRODUCT_NOT_FOUND: &str = "Product not found.";
const ORDER_FAILED: &str = "Sorry, something went wrong while confirming the order.";
const REVIEW_ADDED: &str = "Thank you! Your review has been added.";
const REVIEW_FAILED: &str = "Something went wrong while adding your review.";
const SIGN_IN_TO_REVIEW: &str = "Please sign in to add a review.";
const ORDER_NOT_FOUND: &str = "Order not found.";

impl Storefront {
    /// Add `quantity` units of a catalog product to the cart.
    pub async fn add_to_cart(&mut self, product_id: &ProductId, quantity: u32) -> Outcome {
        let Some(product) = self.product(product_id).cloned() else {
            return self.relay(Outcome::failure(PRODUCT_NOT_FOUND));
        };

        let outcome = self.cart.add(&product, quantity).await;

        self.relay(outcome)
    }

    /// Set a cart line's quantity, capped by the product's stock. Lines for
    /// products missing from the catalog count as out of stock, so they can
    /// still be dropped with a quantity of zero or less.
    pub async fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Outcome {
        let stock = self.product(product_id).map_or(0, |product| product.stock);

        let outcome = self.cart.update_quantity(product_id, quantity, stock).await;

        self.relay(outcome)
    }

    pub async fn remove_from_cart(&mut self, product_id: &ProductId) -> Outcome {
        let name = self
            .product(product_id)
            .map_or_else(|| product_id.to_string(), |product| product.name.clone());

        let outcome = self.cart.remove(product_id, &name).await;

        self.relay(outcome)
    }

    /// Empty the cart and its persisted copy.
    pub async fn clear_cart(&mut self) {
        self.cart.clear().await;
    }

    pub async fn toggle_wishlist(&mut self, product_id: &ProductId) -> Outcome {
        let outcome = self.wishlist.toggle(product_id).await;

        self.relay(outcome)
    }

    /// Submit the cart as an order. The placed order is prepended to the
    /// session's order history and the cart cleared.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] when the cart or customer details are
    /// invalid or the store rejects the order; the cart is kept.
    pub async fn place_order(&mut self, customer: CustomerDetails) -> Result<Order, CheckoutError> {
        let result = checkout(
            self.context.orders.as_ref(),
            &mut self.cart,
            self.index.products(),
            customer,
            Timestamp::now(),
        )
        .await;

        match &result {
            Ok(order) => {
                self.orders.insert(0, order.clone());
                self.relay(Outcome::success(format!("Order {} confirmed.", order.id)));
            }
            Err(CheckoutError::Invalid(error)) => {
                self.relay(Outcome::failure(error.to_string()));
            }
            Err(CheckoutError::Submission(_)) => {
                self.relay(Outcome::failure(ORDER_FAILED));
            }
        }

        result
    }

    /// Post a review as the signed-in user.
    pub async fn add_review(&mut self, product_id: &ProductId, rating: u8, text: &str) -> Outcome {
        let Some(user) = self.identity.user_id().cloned() else {
            return self.relay(Outcome::failure(SIGN_IN_TO_REVIEW));
        };

        let review = match NewReview::new(
            product_id.clone(),
            user,
            self.user_name.clone(),
            rating,
            text,
            Timestamp::now(),
        ) {
            Ok(review) => review,
            Err(error) => return self.relay(Outcome::failure(error.to_string())),
        };

        let outcome = match self.context.reviews.add_review(review).await {
            Ok(review) => {
                self.reviews.insert(0, review);
                Outcome::success(REVIEW_ADDED)
            }
            Err(error) => {
                warn!(%error, product = %product_id, "failed to add review");
                Outcome::failure(REVIEW_FAILED)
            }
        };

        self.relay(outcome)
    }

    /// Ask for one of the session's orders to be cancelled. Only orders
    /// still processing qualify.
    pub async fn request_cancellation(&mut self, order_id: &OrderId) -> Outcome {
        let owned = self.identity.user_id().is_some_and(|user| {
            self.orders
                .iter()
                .any(|order| &order.id == order_id && order.is_owned_by(user))
        });

        if !owned {
            return self.relay(Outcome::failure(ORDER_NOT_FOUND));
        }

        let outcome = match self.context.orders.request_cancellation(order_id.clone()).await {
            Ok(updated) => {
                self.replace_order(updated);
                Outcome::success(format!("Cancellation requested for order {order_id}."))
            }
            Err(error) => {
                warn!(%error, order = %order_id, "cancellation request failed");
                Outcome::failure(error.to_string())
            }
        };

        self.relay(outcome)
    }

    pub(super) fn replace_order(&mut self, updated: Order) {
        if let Some(order) = self.orders.iter_mut().find(|order| order.id == updated.id) {
            *order = updated;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use quire::{ids::Identity, orders::OrderStatus};
    use testresult::TestResult;

    use crate::{
        domain::carts::GUEST_CART_KEY,
        store::{Collection, LocalStorage},
        storefront::tests::{seeded_store, storefront},
        test::MemoryLocalStorage,
    };

    use super::*;

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Salma".to_string(),
            address: "12 Nile St".to_string(),
            phone: "0100000000".to_string(),
        }
    }

    #[tokio::test]
    async fn cart_operations_relay_their_outcomes() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());
        let mut storefront = storefront(&store, &local, Identity::Guest).await;

        let added = storefront.add_to_cart(&"p1".into(), 2).await;

        assert!(added.is_success());
        assert_eq!(
            storefront.take_toast().map(|toast| toast.message),
            Some(added.message().to_string())
        );

        let updated = storefront.update_quantity(&"p1".into(), 5).await;

        assert!(updated.is_success());
        assert_eq!(storefront.cart().quantity(&"p1".into()), 5);

        let over_stock = storefront.update_quantity(&"p1".into(), 99).await;

        assert!(!over_stock.is_success());
        assert_eq!(storefront.cart().quantity(&"p1".into()), 5, "unchanged");

        let unknown = storefront.add_to_cart(&"nope".into(), 1).await;

        assert_eq!(unknown.message(), PRODUCT_NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn out_of_stock_products_cannot_be_added() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());
        let mut storefront = storefront(&store, &local, Identity::Guest).await;

        let outcome = storefront.add_to_cart(&"p3".into(), 1).await;

        assert!(!outcome.is_success());
        assert!(storefront.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn placing_an_order_clears_the_cart_and_records_the_order() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());
        let mut storefront = storefront(&store, &local, Identity::Account("u-1".into())).await;

        storefront.add_to_cart(&"p1".into(), 2).await;

        let order = storefront.place_order(customer()).await?;

        assert_eq!(order.total, 2 * 45_00);
        assert_eq!(order.status, OrderStatus::Processing);
        assert!(storefront.cart().is_empty());
        assert_eq!(storefront.orders().first().map(|o| &o.id), Some(&order.id));
        assert_eq!(
            storefront.take_toast().map(|toast| toast.message),
            Some(format!("Order {} confirmed.", order.id))
        );
        assert_eq!(store.rows(Collection::Orders).len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_orders_keep_the_cart_and_raise_a_toast() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());
        let mut storefront = storefront(&store, &local, Identity::Guest).await;

        storefront.add_to_cart(&"p1".into(), 1).await;
        store.fail_writes(Collection::Orders);

        let result = storefront.place_order(customer()).await;

        assert!(
            matches!(result, Err(CheckoutError::Submission(_))),
            "expected Submission, got {result:?}"
        );
        assert_eq!(storefront.cart().quantity(&"p1".into()), 1);
        assert_eq!(
            storefront.take_toast().map(|toast| toast.message),
            Some(ORDER_FAILED.to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn guests_cannot_review() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());
        let mut storefront = storefront(&store, &local, Identity::Guest).await;

        let outcome = storefront
            .add_review(&"p1".into(), 5, "Lovely paper, no bleed.")
            .await;

        assert_eq!(outcome.message(), SIGN_IN_TO_REVIEW);
        assert!(store.rows(Collection::Reviews).is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn account_reviews_are_stored_and_listed() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());
        let mut storefront = storefront(&store, &local, Identity::Account("u-1".into())).await;

        let outcome = storefront
            .add_review(&"p1".into(), 4, "  Lovely paper, no bleed.  ")
            .await;

        assert_eq!(outcome.message(), REVIEW_ADDED);
        assert_eq!(storefront.reviews().len(), 1);
        assert_eq!(storefront.reviews()[0].review_text, "Lovely paper, no bleed.");
        assert_eq!(storefront.reviews()[0].user_name, "Salma");

        Ok(())
    }

    #[tokio::test]
    async fn invalid_reviews_are_not_submitted() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());
        let mut storefront = storefront(&store, &local, Identity::Account("u-1".into())).await;

        let outcome = storefront.add_review(&"p1".into(), 0, "Lovely paper.").await;

        assert!(!outcome.is_success());
        assert!(store.rows(Collection::Reviews).is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn cancellation_only_applies_to_processing_orders() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());
        let mut storefront = storefront(&store, &local, Identity::Account("u-1".into())).await;

        storefront.add_to_cart(&"p1".into(), 1).await;
        let order = storefront.place_order(customer()).await?;

        let outcome = storefront.request_cancellation(&order.id).await;

        assert_eq!(
            outcome.message(),
            format!("Cancellation requested for order {}.", order.id)
        );
        assert_eq!(storefront.orders()[0].status, OrderStatus::Cancelled);

        let again = storefront.request_cancellation(&order.id).await;

        assert!(!again.is_success(), "cancelled orders cannot be cancelled");

        Ok(())
    }

    #[tokio::test]
    async fn orders_outside_the_session_cannot_be_cancelled() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());
        let mut owner = storefront(&store, &local, Identity::Account("u-1".into())).await;

        owner.add_to_cart(&"p1".into(), 1).await;
        let order = owner.place_order(customer()).await?;

        let mut guest = storefront(&store, &local, Identity::Guest).await;
        let mut other = storefront(&store, &local, Identity::Account("u-2".into())).await;

        for session in [&mut guest, &mut other] {
            let outcome = session.request_cancellation(&order.id).await;

            assert_eq!(outcome.message(), ORDER_NOT_FOUND);
        }

        let rows = store.rows(Collection::Orders);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["status"], "Processing", "order is untouched");

        Ok(())
    }

    #[tokio::test]
    async fn lines_for_deleted_products_can_still_be_dropped() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());

        local
            .set(
                GUEST_CART_KEY,
                r#"[{"productId":"gone","quantity":2}]"#.to_string(),
            )
            .await?;

        let mut storefront = storefront(&store, &local, Identity::Guest).await;

        let raised = storefront.update_quantity(&"gone".into(), 3).await;

        assert!(!raised.is_success(), "no stock for unknown products");
        assert_eq!(storefront.cart().quantity(&"gone".into()), 2);

        let dropped = storefront.update_quantity(&"gone".into(), 0).await;

        assert!(dropped.is_success());
        assert!(storefront.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn account_orders_are_loaded_for_the_user_only() -> TestResult {
        let store = seeded_store()?;
        let local = Arc::new(MemoryLocalStorage::new());
        let placed_at = Timestamp::now();

        let mine = serde_json::json!({
            "id": "o-1", "userId": "u-1", "customerName": "Salma", "address": "x",
            "phone": "1", "date": placed_at, "total": 4500, "status": "Processing",
            "items": [{ "productId": "p1", "quantity": 1 }], "paymentMethod": "cod"
        });
        let mut theirs = mine.clone();
        theirs["id"] = serde_json::json!("o-2");
        theirs["userId"] = serde_json::json!("u-2");

        store.seed(Collection::Orders, vec![mine, theirs]);

        let storefront = storefront(&store, &local, Identity::Account("u-1".into())).await;

        let ids: Vec<&str> = storefront.orders().iter().map(|o| o.id.as_str()).collect();

        assert_eq!(ids, ["o-1"]);

        Ok(())
    }
}
