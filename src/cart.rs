//! Cart Ledger
//!
//! In-memory mapping from product to quantity. Every entry holds at least one
//! unit; stock ceilings are checked against the stock value supplied at call
//! time and never re-validated afterwards.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    outcome::Outcome,
    products::{Product, ProductId},
};

/// A cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product in the cart
    pub product_id: ProductId,

    /// Units, always at least one
    pub quantity: u32,
}

/// Cart ledger keyed by product id.
///
/// Lines keep their insertion order for display; keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartLedger {
    items: Vec<CartItem>,
}

impl CartLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from persisted lines.
    ///
    /// Lines with a zero quantity are dropped and duplicate product ids are
    /// folded together, so the invariants hold even for hand-edited storage.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut ledger = Self::new();

        for item in items {
            ledger.credit(item.product_id, item.quantity);
        }

        ledger
    }

    /// Add `quantity` units of `product`, refusing to exceed its stock.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Outcome {
        if product.stock == 0 {
            return Outcome::failure("Sorry, this product is out of stock.");
        }

        if quantity == 0 {
            return Outcome::failure("Please choose a quantity of at least one.");
        }

        match self
            .items
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            Some(line) => {
                let requested = line.quantity.saturating_add(quantity);

                if requested > product.stock {
                    return Outcome::failure(format!(
                        "Can't add more. You already have {} and only {} are available.",
                        line.quantity, product.stock
                    ));
                }

                line.quantity = requested;
            }
            None => {
                if quantity > product.stock {
                    return Outcome::failure(format!(
                        "The requested quantity isn't available. Available: {}",
                        product.stock
                    ));
                }

                self.items.push(CartItem {
                    product_id: product.id.clone(),
                    quantity,
                });
            }
        }

        Outcome::success(format!("Added \"{}\" to the cart!", product.name))
    }

    /// Set the quantity of a line exactly.
    ///
    /// A non-positive quantity removes the line. Updating a product that is
    /// not in the cart leaves the ledger unchanged.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64, stock: u32) -> Outcome {
        let Ok(quantity) = u32::try_from(quantity) else {
            return if quantity < 0 {
                self.remove(product_id, "The product")
            } else {
                Outcome::failure(format!(
                    "The requested quantity isn't available. Available: {stock}"
                ))
            };
        };

        if quantity == 0 {
            return self.remove(product_id, "The product");
        }

        if quantity > stock {
            return Outcome::failure(format!(
                "The requested quantity isn't available. Available: {stock}"
            ));
        }

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| &line.product_id == product_id)
        {
            line.quantity = quantity;
        }

        Outcome::success("")
    }

    /// Remove a line. Removing an absent product is a successful no-op.
    pub fn remove(&mut self, product_id: &ProductId, product_name: &str) -> Outcome {
        self.items.retain(|line| &line.product_id != product_id);

        Outcome::success(format!("Removed \"{product_name}\" from the cart."))
    }

    /// Empty the ledger.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Fold `other` into this ledger by summing quantities per product.
    ///
    /// Neither side's quantity overwrites the other's, and stock ceilings are
    /// not consulted.
    pub fn merge(&mut self, other: &CartLedger) {
        for item in &other.items {
            self.credit(item.product_id.clone(), item.quantity);
        }
    }

    /// Quantity held for `product_id`, zero when absent.
    pub fn quantity(&self, product_id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|line| &line.product_id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Whether `product_id` has a line.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|line| &line.product_id == product_id)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the ledger has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price times quantity, in minor units.
    ///
    /// Lines whose product is missing from `products` contribute nothing.
    pub fn total(&self, products: &[Product]) -> u64 {
        let prices: FxHashMap<&ProductId, u64> = products
            .iter()
            .map(|product| (&product.id, product.price))
            .collect();

        self.items
            .iter()
            .filter_map(|line| {
                prices
                    .get(&line.product_id)
                    .map(|price| price.saturating_mul(u64::from(line.quantity)))
            })
            .fold(0, u64::saturating_add)
    }

    fn credit(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }

        match self
            .items
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product_id,
                quantity,
            }),
        }
    }
}

impl From<CartLedger> for Vec<CartItem> {
    fn from(ledger: CartLedger) -> Self {
        ledger.items
    }
}
