//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use quire::{
    ids::UserId,
    orders::{NewOrder, Order, OrderId, OrderStatus},
};
use serde_json::json;
use tracing::info;

use crate::{
    domain::orders::errors::OrdersServiceError,
    store::{Collection, Direction, Filter, RowStore, decode, decode_all, decode_one, encode},
};

#[derive(Clone)]
pub struct StoreOrdersService {
    store: Arc<dyn RowStore>,
}

impl StoreOrdersService {
    #[must_use]
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    async fn set_status(
        &self,
        order: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let rows = self
            .store
            .update(
                Collection::Orders,
                Filter::eq("id", order.as_str()),
                json!({ "status": status }),
            )
            .await?;

        Ok(decode_one(rows)?)
    }
}

#[async_trait]
impl OrdersService for StoreOrdersService {
    async fn place_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let row = self.store.insert(Collection::Orders, encode(&order)?).await?;
        let placed: Order = decode(row)?;

        info!(order = %placed.id, total = placed.total, "order placed");

        Ok(placed)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let rows = self
            .store
            .select(
                Collection::Orders,
                Filter::all().order_by("date", Direction::Descending),
            )
            .await?;

        Ok(decode_all(rows)?)
    }

    async fn list_orders_for_user(&self, user: UserId) -> Result<Vec<Order>, OrdersServiceError> {
        let rows = self
            .store
            .select(
                Collection::Orders,
                Filter::eq("userId", user.as_str()).order_by("date", Direction::Descending),
            )
            .await?;

        Ok(decode_all(rows)?)
    }

    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        self.set_status(&order, status).await
    }

    async fn request_cancellation(&self, order: OrderId) -> Result<Order, OrdersServiceError> {
        let rows = self
            .store
            .select(Collection::Orders, Filter::eq("id", order.as_str()).limit(1))
            .await?;

        let current: Order = decode_one(rows)?;
        let status = current.request_cancellation()?;

        self.set_status(&order, status).await
    }

    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError> {
        let rows_affected = self
            .store
            .delete(Collection::Orders, Filter::eq("id", order.as_str()))
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Submits a new order; the store assigns its id.
    async fn place_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieves every order, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieves one account's orders, newest first.
    async fn list_orders_for_user(&self, user: UserId) -> Result<Vec<Order>, OrdersServiceError>;

    /// Sets an order's status unconditionally.
    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Cancels an order on the customer's behalf, while it is still
    /// processing.
    async fn request_cancellation(&self, order: OrderId) -> Result<Order, OrdersServiceError>;

    /// Deletes an order.
    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError>;
}
