//! Wishlist Set

use crate::{outcome::Outcome, products::ProductId};

/// Set of wished-for products, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistSet {
    ids: Vec<ProductId>,
}

impl WishlistSet {
    /// An empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a wishlist from persisted ids, dropping duplicates.
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut set = Self::new();

        for id in ids {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }

        set
    }

    /// Flip membership of `product_id`.
    pub fn toggle(&mut self, product_id: &ProductId) -> Outcome {
        if self.contains(product_id) {
            self.ids.retain(|id| id != product_id);

            Outcome::success("Removed from wishlist.")
        } else {
            self.ids.push(product_id.clone());

            Outcome::success("Added to wishlist!")
        }
    }

    /// Drop `product_id` if present. Returns whether anything changed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.ids.len();

        self.ids.retain(|id| id != product_id);

        self.ids.len() != before
    }

    /// Whether `product_id` is wished for.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.ids.contains(product_id)
    }

    /// Ids in the order they were added.
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Number of wished-for products.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut wishlist = WishlistSet::new();
        let id = ProductId::new("p1");

        let added = wishlist.toggle(&id);
        assert_eq!(added.message(), "Added to wishlist!");
        assert!(wishlist.contains(&id));

        let removed = wishlist.toggle(&id);
        assert_eq!(removed.message(), "Removed from wishlist.");
        assert!(wishlist.is_empty());
    }

    #[test]
    fn from_ids_deduplicates_keeping_first_position() {
        let wishlist = WishlistSet::from_ids(["b", "a", "b"].map(ProductId::from));

        assert_eq!(wishlist.ids(), ["b", "a"].map(ProductId::from));
    }

    #[test]
    fn remove_reports_change() {
        let mut wishlist = WishlistSet::from_ids([ProductId::from("a")]);

        assert!(wishlist.remove(&"a".into()));
        assert!(!wishlist.remove(&"a".into()));
    }
}
