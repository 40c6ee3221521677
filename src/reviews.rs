//! Reviews

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ids::{TypedId, UserId},
    products::{ProductId, Ratings},
};

/// Review Id
pub type ReviewId = TypedId<Review>;

/// Shortest accepted review body, in characters, after trimming.
pub const MIN_REVIEW_CHARS: usize = 10;

/// Highest star rating.
pub const MAX_STARS: u8 = 5;

/// Review validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// Rating outside one to five stars.
    #[error("rating must be between 1 and {MAX_STARS} stars, got {0}")]
    RatingOutOfRange(u8),

    /// Body too short once trimmed.
    #[error("review must be at least {MIN_REVIEW_CHARS} characters")]
    TooShort,
}

/// A product review. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Backend-assigned id
    pub id: ReviewId,

    /// Reviewed product
    pub product_id: ProductId,

    /// Author
    pub user_id: UserId,

    /// Author display name
    pub user_name: String,

    /// Author avatar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar_url: Option<String>,

    /// Stars, one to five
    pub rating: u8,

    /// Body
    pub review_text: String,

    /// Creation time
    pub created_at: Timestamp,
}

/// A validated review awaiting submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    /// Reviewed product
    pub product_id: ProductId,

    /// Author
    pub user_id: UserId,

    /// Author display name
    pub user_name: String,

    /// Stars, one to five
    pub rating: u8,

    /// Trimmed body
    pub review_text: String,

    /// Creation time
    pub created_at: Timestamp,
}

impl NewReview {
    /// Validate and timestamp a review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError`] when the rating is outside `1..=5` or the
    /// trimmed body is shorter than [`MIN_REVIEW_CHARS`].
    pub fn new(
        product_id: ProductId,
        user_id: UserId,
        user_name: impl Into<String>,
        rating: u8,
        review_text: &str,
        created_at: Timestamp,
    ) -> Result<Self, ReviewError> {
        if !(1..=MAX_STARS).contains(&rating) {
            return Err(ReviewError::RatingOutOfRange(rating));
        }

        let review_text = review_text.trim();

        if review_text.chars().count() < MIN_REVIEW_CHARS {
            return Err(ReviewError::TooShort);
        }

        Ok(Self {
            product_id,
            user_id,
            user_name: user_name.into(),
            rating,
            review_text: review_text.to_string(),
            created_at,
        })
    }
}

/// Reviews of `product_id`, newest first.
pub fn reviews_for_product<'a>(reviews: &'a [Review], product_id: &ProductId) -> Vec<&'a Review> {
    let mut matching: Vec<&Review> = reviews
        .iter()
        .filter(|review| review.product_id == *product_id)
        .collect();

    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    matching
}

/// Mean rating and count over `reviews`.
pub fn rating_summary<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Ratings {
    let (sum, count) = reviews
        .into_iter()
        .fold((0_u32, 0_u32), |(sum, count), review| {
            (sum + u32::from(review.rating), count + 1)
        });

    if count == 0 {
        return Ratings::default();
    }

    Ratings {
        average: f64::from(sum) / f64::from(count),
        count,
    }
}
