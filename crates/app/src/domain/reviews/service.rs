//! Reviews service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use quire::{
    products::ProductId,
    reviews::{NewReview, Review, ReviewId},
};

use crate::{
    domain::reviews::errors::ReviewsServiceError,
    store::{Collection, Direction, Filter, RowStore, decode, decode_all, encode},
};

#[derive(Clone)]
pub struct StoreReviewsService {
    store: Arc<dyn RowStore>,
}

impl StoreReviewsService {
    #[must_use]
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReviewsService for StoreReviewsService {
    async fn list_reviews(&self) -> Result<Vec<Review>, ReviewsServiceError> {
        let rows = self
            .store
            .select(
                Collection::Reviews,
                Filter::all().order_by("created_at", Direction::Descending),
            )
            .await?;

        Ok(decode_all(rows)?)
    }

    async fn list_reviews_for_product(
        &self,
        product: ProductId,
    ) -> Result<Vec<Review>, ReviewsServiceError> {
        let rows = self
            .store
            .select(
                Collection::Reviews,
                Filter::eq("product_id", product.as_str())
                    .order_by("created_at", Direction::Descending),
            )
            .await?;

        Ok(decode_all(rows)?)
    }

    async fn add_review(&self, review: NewReview) -> Result<Review, ReviewsServiceError> {
        let row = self
            .store
            .insert(Collection::Reviews, encode(&review)?)
            .await?;

        Ok(decode(row)?)
    }

    async fn delete_review(&self, review: ReviewId) -> Result<(), ReviewsServiceError> {
        let rows_affected = self
            .store
            .delete(Collection::Reviews, Filter::eq("id", review.as_str()))
            .await?;

        if rows_affected == 0 {
            return Err(ReviewsServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Retrieves every review, newest first.
    async fn list_reviews(&self) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Retrieves one product's reviews, newest first.
    async fn list_reviews_for_product(
        &self,
        product: ProductId,
    ) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Stores a validated review.
    async fn add_review(&self, review: NewReview) -> Result<Review, ReviewsServiceError>;

    /// Deletes a review.
    async fn delete_review(&self, review: ReviewId) -> Result<(), ReviewsServiceError>;
}
