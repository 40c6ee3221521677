//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use quire::products::{Category, CategoryId, Product, ProductId, SubCategory, SubCategoryId};
use tracing::warn;

use crate::{
    domain::catalog::{
        errors::CatalogServiceError,
        records::{join, join_with, lookup, product_row},
    },
    store::{Collection, Filter, RowStore, StoreError, decode, decode_all, encode},
};

#[derive(Clone)]
pub struct StoreCatalogService {
    store: Arc<dyn RowStore>,
}

impl StoreCatalogService {
    #[must_use]
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<(), CatalogServiceError> {
        let rows_affected = self.store.delete(collection, Filter::eq("id", id)).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl CatalogService for StoreCatalogService {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        let (rows, sub_categories) = tokio::try_join!(
            async {
                self.store
                    .select(Collection::Products, Filter::all())
                    .await
                    .map_err(CatalogServiceError::from)
            },
            self.list_sub_categories(),
        )?;

        let sub_categories = lookup(&sub_categories);
        let mut products = Vec::with_capacity(rows.len());

        for row in rows {
            let id = row.get("id").cloned();

            match join(row, &sub_categories)? {
                Some(product) => products.push(product),
                None => warn!(product = ?id, "skipping product with unknown sub-category"),
            }
        }

        Ok(products)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError> {
        let rows = self
            .store
            .select(Collection::Categories, Filter::all())
            .await?;

        Ok(decode_all(rows)?)
    }

    async fn list_sub_categories(&self) -> Result<Vec<SubCategory>, CatalogServiceError> {
        let rows = self
            .store
            .select(Collection::SubCategories, Filter::all())
            .await?;

        Ok(decode_all(rows)?)
    }

    async fn create_product(&self, product: Product) -> Result<Product, CatalogServiceError> {
        let row = self
            .store
            .insert(Collection::Products, product_row(&product)?)
            .await?;

        Ok(join_with(row, &product.sub_category)?)
    }

    async fn update_product(&self, product: Product) -> Result<Product, CatalogServiceError> {
        let rows = self
            .store
            .update(
                Collection::Products,
                Filter::eq("id", product.id.as_str()),
                product_row(&product)?,
            )
            .await?;

        let row = rows.into_iter().next().ok_or(StoreError::NotFound)?;

        Ok(join_with(row, &product.sub_category)?)
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), CatalogServiceError> {
        self.delete_by_id(Collection::Products, product.as_str())
            .await
    }

    async fn create_category(&self, category: Category) -> Result<Category, CatalogServiceError> {
        let row = self
            .store
            .insert(Collection::Categories, encode(&category)?)
            .await?;

        Ok(decode(row)?)
    }

    async fn update_category(&self, category: Category) -> Result<Category, CatalogServiceError> {
        let rows = self
            .store
            .update(
                Collection::Categories,
                Filter::eq("id", category.id.as_str()),
                encode(&category)?,
            )
            .await?;

        let row = rows.into_iter().next().ok_or(StoreError::NotFound)?;

        Ok(decode(row)?)
    }

    async fn delete_category(&self, category: CategoryId) -> Result<(), CatalogServiceError> {
        self.delete_by_id(Collection::Categories, category.as_str())
            .await
    }

    async fn create_sub_category(
        &self,
        sub_category: SubCategory,
    ) -> Result<SubCategory, CatalogServiceError> {
        let row = self
            .store
            .insert(Collection::SubCategories, encode(&sub_category)?)
            .await?;

        Ok(decode(row)?)
    }

    async fn update_sub_category(
        &self,
        sub_category: SubCategory,
    ) -> Result<SubCategory, CatalogServiceError> {
        let rows = self
            .store
            .update(
                Collection::SubCategories,
                Filter::eq("id", sub_category.id.as_str()),
                encode(&sub_category)?,
            )
            .await?;

        let row = rows.into_iter().next().ok_or(StoreError::NotFound)?;

        Ok(decode(row)?)
    }

    async fn delete_sub_category(
        &self,
        sub_category: SubCategoryId,
    ) -> Result<(), CatalogServiceError> {
        self.delete_by_id(Collection::SubCategories, sub_category.as_str())
            .await
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves every product, joined with its sub-category.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError>;

    /// Retrieves every main category.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError>;

    /// Retrieves every sub-category.
    async fn list_sub_categories(&self) -> Result<Vec<SubCategory>, CatalogServiceError>;

    /// Creates a product.
    async fn create_product(&self, product: Product) -> Result<Product, CatalogServiceError>;

    /// Replaces the product sharing `product`'s id.
    async fn update_product(&self, product: Product) -> Result<Product, CatalogServiceError>;

    /// Deletes a product.
    async fn delete_product(&self, product: ProductId) -> Result<(), CatalogServiceError>;

    /// Creates a main category.
    async fn create_category(&self, category: Category) -> Result<Category, CatalogServiceError>;

    /// Replaces the category sharing `category`'s id.
    async fn update_category(&self, category: Category) -> Result<Category, CatalogServiceError>;

    /// Deletes a main category. Its sub-categories are left to the caller.
    async fn delete_category(&self, category: CategoryId) -> Result<(), CatalogServiceError>;

    /// Creates a sub-category.
    async fn create_sub_category(
        &self,
        sub_category: SubCategory,
    ) -> Result<SubCategory, CatalogServiceError>;

    /// Replaces the sub-category sharing `sub_category`'s id.
    async fn update_sub_category(
        &self,
        sub_category: SubCategory,
    ) -> Result<SubCategory, CatalogServiceError>;

    /// Deletes a sub-category. Its products are left to the caller.
    async fn delete_sub_category(
        &self,
        sub_category: SubCategoryId,
    ) -> Result<(), CatalogServiceError>;
}
