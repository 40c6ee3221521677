//! Cart rows.

use quire::{cart::CartItem, ids::UserId};
use serde::{Deserialize, Serialize};

/// One account's persisted cart, stored wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRecord {
    /// Owning account
    pub user_id: UserId,

    /// Cart lines
    #[serde(default)]
    pub items: Vec<CartItem>,
}
