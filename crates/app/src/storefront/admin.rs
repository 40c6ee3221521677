//! Admin operations.
//!
//! Deletes cascade: a category takes its sub-categories with it, a
//! sub-category its products, and a product is dropped from the cart,
//! the wishlist and the loaded reviews.

use quire::{
    content::SiteContent,
    orders::{Order, OrderId, OrderStatus},
    outcome::Outcome,
    products::{CategoryId, ProductId, SubCategoryId},
    reviews::ReviewId,
};
use tracing::{info, warn};

use super::Storefront;
use crate::domain::orders::OrdersServiceError;

impl Storefront {
    /// Every order in the store, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError`] when the orders cannot be fetched.
    pub async fn all_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        self.context.orders.list_orders().await
    }

    pub async fn delete_product(&mut self, product_id: &ProductId) -> Outcome {
        let Some(name) = self.product(product_id).map(|product| product.name.clone()) else {
            return self.relay(Outcome::failure("Product not found."));
        };

        let outcome = match self.remove_product(product_id).await {
            Ok(()) => Outcome::success(format!("Deleted product \"{name}\".")),
            Err(message) => Outcome::failure(message),
        };

        self.relay(outcome)
    }

    pub async fn delete_sub_category(&mut self, sub_category_id: &SubCategoryId) -> Outcome {
        let outcome = match self.remove_sub_category(sub_category_id).await {
            Ok(name) => Outcome::success(format!("Deleted sub-category \"{name}\".")),
            Err(message) => Outcome::failure(message),
        };

        self.relay(outcome)
    }

    pub async fn delete_category(&mut self, category_id: &CategoryId) -> Outcome {
        let Some(name) = self
            .categories
            .iter()
            .find(|category| &category.id == category_id)
            .map(|category| category.name.clone())
        else {
            return self.relay(Outcome::failure("Category not found."));
        };

        let children: Vec<SubCategoryId> = self
            .sub_categories
            .iter()
            .filter(|sub_category| &sub_category.main_category_id == category_id)
            .map(|sub_category| sub_category.id.clone())
            .collect();

        for child in &children {
            if let Err(message) = self.remove_sub_category(child).await {
                return self.relay(Outcome::failure(message));
            }
        }

        let outcome = match self.context.catalog.delete_category(category_id.clone()).await {
            Ok(()) => {
                self.categories.retain(|category| &category.id != category_id);
                info!(category = %category_id, sub_categories = children.len(), "category deleted");
                Outcome::success(format!("Deleted category \"{name}\"."))
            }
            Err(error) => {
                warn!(%error, category = %category_id, "failed to delete category");
                Outcome::failure(error.to_string())
            }
        };

        self.relay(outcome)
    }

    /// Move an order to `status`.
    pub async fn update_order_status(&mut self, order_id: &OrderId, status: OrderStatus) -> Outcome {
        let outcome = match self.context.orders.update_status(order_id.clone(), status).await {
            Ok(updated) => {
                self.replace_order(updated);
                Outcome::success(format!("Order {order_id} is now {}.", status.as_str()))
            }
            Err(error) => {
                warn!(%error, order = %order_id, "failed to update order status");
                Outcome::failure(error.to_string())
            }
        };

        self.relay(outcome)
    }

    pub async fn delete_order(&mut self, order_id: &OrderId) -> Outcome {
        let outcome = match self.context.orders.delete_order(order_id.clone()).await {
            Ok(()) => {
                self.orders.retain(|order| &order.id != order_id);
                Outcome::success(format!("Deleted order {order_id}."))
            }
            Err(error) => Outcome::failure(error.to_string()),
        };

        self.relay(outcome)
    }

    pub async fn delete_review(&mut self, review_id: &ReviewId) -> Outcome {
        let outcome = match self.context.reviews.delete_review(review_id.clone()).await {
            Ok(()) => {
                self.reviews.retain(|review| &review.id != review_id);
                Outcome::success("Review deleted.")
            }
            Err(error) => Outcome::failure(error.to_string()),
        };

        self.relay(outcome)
    }

    /// Replace the editable homepage and deals-page content.
    pub async fn update_site_content(&mut self, content: SiteContent) -> Outcome {
        let outcome = match self.context.content.update_content(content).await {
            Ok(saved) => {
                self.content = saved;
                Outcome::success("Site content saved.")
            }
            Err(error) => {
                warn!(%error, "failed to save site content");
                Outcome::failure(error.to_string())
            }
        };

        self.relay(outcome)
    }

    async fn remove_product(&mut self, product_id: &ProductId) -> Result<(), String> {
        self.context
            .catalog
            .delete_product(product_id.clone())
            .await
            .map_err(|error| {
                warn!(%error, product = %product_id, "failed to delete product");
                error.to_string()
            })?;

        let name = self
            .product(product_id)
            .map_or_else(|| product_id.to_string(), |product| product.name.clone());

        if self.cart.ledger().contains(product_id) {
            self.cart.remove(product_id, &name).await;
        }

        self.wishlist.remove(product_id).await;
        self.reviews.retain(|review| &review.product_id != product_id);

        let products = self
            .index
            .products()
            .iter()
            .filter(|product| &product.id != product_id)
            .cloned()
            .collect();

        self.rebuild_index(products);

        Ok(())
    }

    async fn remove_sub_category(&mut self, sub_category_id: &SubCategoryId) -> Result<String, String> {
        let Some(name) = self
            .sub_categories
            .iter()
            .find(|sub_category| &sub_category.id == sub_category_id)
            .map(|sub_category| sub_category.name.clone())
        else {
            return Err("Sub-category not found.".to_string());
        };

        let products: Vec<ProductId> = self
            .products()
            .iter()
            .filter(|product| &product.sub_category.id == sub_category_id)
            .map(|product| product.id.clone())
            .collect();

        for product in &products {
            self.remove_product(product).await?;
        }

        self.context
            .catalog
            .delete_sub_category(sub_category_id.clone())
            .await
            .map_err(|error| {
                warn!(%error, sub_category = %sub_category_id, "failed to delete sub-category");
                error.to_string()
            })?;

        self.sub_categories
            .retain(|sub_category| &sub_category.id != sub_category_id);

        info!(sub_category = %sub_category_id, products = products.len(), "sub-category deleted");

        Ok(name)
    }
}
