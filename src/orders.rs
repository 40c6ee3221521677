//! Orders
//!
//! Order snapshots taken from the cart at checkout, and the status rules
//! that govern them afterwards.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{CartItem, CartLedger},
    ids::{TypedId, UserId},
    products::Product,
};

/// Order Id
pub type OrderId = TypedId<Order>;

/// Errors raised while building or transitioning an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Checkout attempted with nothing in the cart.
    #[error("the cart is empty")]
    EmptyCart,

    /// A required customer detail was blank.
    #[error("missing customer {0}")]
    MissingDetail(&'static str),

    /// Customer cancellation outside the processing state.
    #[error("order can no longer be cancelled (status: {0})")]
    NotCancellable(OrderStatus),

    /// Unrecognised status identifier.
    #[error("unknown order status `{0}`")]
    UnknownStatus(String),
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, not yet shipped
    #[default]
    Processing,

    /// Handed to the courier
    Shipped,

    /// Received by the customer
    Delivered,

    /// Cancelled by the customer or the shop
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Stable identifier, as stored by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether the customer may still cancel.
    pub fn is_cancellable(self) -> bool {
        self == Self::Processing
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| OrderError::UnknownStatus(s.to_string()))
    }
}

/// Payment method. Only cash on delivery is offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash on delivery
    #[default]
    #[serde(rename = "cod")]
    CashOnDelivery,
}

/// Contact details captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    /// Full name
    pub name: String,

    /// Billing address
    pub address: String,

    /// Phone number
    pub phone: String,
}

impl CustomerDetails {
    /// Trim every field and reject blanks.
    pub fn validated(self) -> Result<Self, OrderError> {
        let name = required(self.name, "name")?;
        let address = required(self.address, "address")?;
        let phone = required(self.phone, "phone")?;

        Ok(Self {
            name,
            address,
            phone,
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, OrderError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(OrderError::MissingDetail(field));
    }

    Ok(trimmed.to_string())
}

/// An order as submitted, before the backend assigns its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Ordering account, absent for guest checkouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    /// Customer name
    pub customer_name: String,

    /// Billing address
    pub address: String,

    /// Phone number
    pub phone: String,

    /// Creation time
    pub date: Timestamp,

    /// Total in minor units, priced at checkout
    pub total: u64,

    /// Always [`OrderStatus::Processing`] on creation
    pub status: OrderStatus,

    /// Snapshot of the cart
    pub items: Vec<CartItem>,

    /// Payment method
    pub payment_method: PaymentMethod,
}

impl NewOrder {
    /// Snapshot `ledger` into a processing order, pricing it against
    /// `products`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyCart`] for an empty ledger and
    /// [`OrderError::MissingDetail`] for blank contact details.
    pub fn from_ledger(
        ledger: &CartLedger,
        products: &[Product],
        customer: CustomerDetails,
        user_id: Option<UserId>,
        date: Timestamp,
    ) -> Result<Self, OrderError> {
        if ledger.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let customer = customer.validated()?;

        Ok(Self {
            user_id,
            customer_name: customer.name,
            address: customer.address,
            phone: customer.phone,
            date,
            total: ledger.total(products),
            status: OrderStatus::Processing,
            items: ledger.items().to_vec(),
            payment_method: PaymentMethod::CashOnDelivery,
        })
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend-assigned id
    pub id: OrderId,

    /// Ordering account, absent for guest checkouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    /// Customer name
    pub customer_name: String,

    /// Billing address
    pub address: String,

    /// Phone number
    pub phone: String,

    /// Creation time
    pub date: Timestamp,

    /// Total in minor units
    pub total: u64,

    /// Current status
    pub status: OrderStatus,

    /// Ordered items
    pub items: Vec<CartItem>,

    /// Payment method
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl Order {
    /// Total units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Whether the order belongs to `user_id`.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id.as_ref() == Some(user_id)
    }

    /// Status after a customer cancellation request.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotCancellable`] once the order has left
    /// the processing state.
    pub fn request_cancellation(&self) -> Result<OrderStatus, OrderError> {
        if !self.status.is_cancellable() {
            return Err(OrderError::NotCancellable(self.status));
        }

        Ok(OrderStatus::Cancelled)
    }
}

/// Orders belonging to `user_id`, in input order.
pub fn orders_for_user<'a>(orders: &'a [Order], user_id: &UserId) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|order| order.is_owned_by(user_id))
        .collect()
}
