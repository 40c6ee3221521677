//! Content service.
//!
//! Site content lives in a single row with a fixed id.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use quire::content::SiteContent;
use serde_json::Value;
use tracing::debug;

use crate::{
    domain::content::errors::ContentServiceError,
    store::{Collection, Filter, RowStore, decode, encode},
};

/// Id of the site content row.
pub const SITE_CONTENT_ID: u64 = 1;

#[derive(Clone)]
pub struct StoreContentService {
    store: Arc<dyn RowStore>,
}

impl StoreContentService {
    #[must_use]
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ContentService for StoreContentService {
    async fn get_content(&self) -> Result<SiteContent, ContentServiceError> {
        let rows = self
            .store
            .select(
                Collection::SiteContent,
                Filter::eq("id", SITE_CONTENT_ID).limit(1),
            )
            .await?;

        let Some(row) = rows.into_iter().next() else {
            debug!("no stored site content, using defaults");
            return Ok(SiteContent::default());
        };

        Ok(decode(row)?)
    }

    async fn update_content(&self, content: SiteContent) -> Result<SiteContent, ContentServiceError> {
        let mut row = encode(&content)?;

        if let Value::Object(fields) = &mut row {
            fields.insert("id".to_string(), Value::from(SITE_CONTENT_ID));
        }

        let stored = self.store.upsert(Collection::SiteContent, row, "id").await?;

        Ok(decode(stored)?)
    }
}

#[automock]
#[async_trait]
pub trait ContentService: Send + Sync {
    /// The stored site content, or the built-in default when none exists.
    async fn get_content(&self) -> Result<SiteContent, ContentServiceError>;

    /// Replace the stored site content.
    async fn update_content(&self, content: SiteContent) -> Result<SiteContent, ContentServiceError>;
}
