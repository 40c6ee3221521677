//! Row Store
//!
//! The persistence boundary. The hosted backend is reached as a generic
//! row store addressed by collection name; device-local state goes through
//! [`LocalStorage`].

use async_trait::async_trait;
use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

pub mod errors;
pub mod filter;
pub mod local;
pub mod rest;

pub use errors::{StorageError, StoreError};
pub use filter::{Direction, Filter};
pub use local::{FileLocalStorage, LocalStorage};
pub use rest::{RestConfig, RestRowStore};

/// A JSON row with named fields.
pub type Row = Value;

/// Backend collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Product catalog
    Products,

    /// Main categories
    Categories,

    /// Sub-categories
    SubCategories,

    /// Placed orders
    Orders,

    /// Product reviews
    Reviews,

    /// Editable storefront content, a single row
    SiteContent,

    /// One cart row per account
    UserCarts,

    /// One wishlist row per account
    UserWishlists,

    /// Support conversations, keyed by user id
    ChatConversations,

    /// Support messages
    ChatMessages,
}

impl Collection {
    /// Backend collection name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Categories => "categories",
            Self::SubCategories => "sub_categories",
            Self::Orders => "orders",
            Self::Reviews => "reviews",
            Self::SiteContent => "site_content",
            Self::UserCarts => "user_carts",
            Self::UserWishlists => "user_wishlists",
            Self::ChatConversations => "chat_conversations",
            Self::ChatMessages => "chat_messages",
        }
    }
}

#[automock]
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Rows of `collection` matching `filter`.
    async fn select(&self, collection: Collection, filter: Filter) -> Result<Vec<Row>, StoreError>;

    /// Insert `row`, returning it as stored (with any backend-assigned id).
    async fn insert(&self, collection: Collection, row: Row) -> Result<Row, StoreError>;

    /// Merge `patch` into every row matching `filter`, returning the updated
    /// rows.
    async fn update(
        &self,
        collection: Collection,
        filter: Filter,
        patch: Row,
    ) -> Result<Vec<Row>, StoreError>;

    /// Insert `row`, or replace the row sharing its `key` column.
    async fn upsert(
        &self,
        collection: Collection,
        row: Row,
        key: &'static str,
    ) -> Result<Row, StoreError>;

    /// Delete every row matching `filter`, returning how many went.
    async fn delete(&self, collection: Collection, filter: Filter) -> Result<u64, StoreError>;
}

/// Serialize a typed value into a row.
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] when the value cannot be represented
/// as JSON.
pub fn encode<T: Serialize>(value: &T) -> Result<Row, StoreError> {
    Ok(serde_json::to_value(value)?)
}

/// Deserialize a row into a typed value.
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] when the row does not have the
/// expected shape.
pub fn decode<T: DeserializeOwned>(row: Row) -> Result<T, StoreError> {
    Ok(serde_json::from_value(row)?)
}

/// Deserialize every row.
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] on the first row with an unexpected
/// shape.
pub fn decode_all<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, StoreError> {
    rows.into_iter().map(decode).collect()
}

/// Deserialize the single row a keyed query returned.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] when there were no rows.
pub fn decode_one<T: DeserializeOwned>(rows: Vec<Row>) -> Result<T, StoreError> {
    rows.into_iter()
        .next()
        .ok_or(StoreError::NotFound)
        .and_then(decode)
}
