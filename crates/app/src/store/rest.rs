//! REST row store.
//!
//! Talks to a hosted Postgres REST gateway: one endpoint per collection,
//! equality filters as `column=eq.value` query pairs, representations
//! returned on writes.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header::HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::store::{Collection, Direction, Filter, Row, RowStore, StoreError};

const RETURN_REPRESENTATION: &str = "return=representation";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=representation";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Backend base URL, e.g. `"https://project.example.co"`.
    pub base_url: String,

    /// Public API key, sent with every request.
    pub api_key: String,

    /// Signed-in session token. The API key is used as the bearer when
    /// absent.
    pub access_token: Option<String>,
}

/// [`RowStore`] over the backend's REST interface.
#[derive(Debug, Clone)]
pub struct RestRowStore {
    config: RestConfig,
    http: Client,
}

impl RestRowStore {
    /// Create a new store from the given configuration.
    #[must_use]
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, collection: Collection) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            collection.as_str()
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .config
            .access_token
            .as_deref()
            .unwrap_or(&self.config.api_key);

        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(bearer)
    }

    async fn rows(
        &self,
        collection: Collection,
        request: RequestBuilder,
    ) -> Result<Vec<Row>, StoreError> {
        let response = checked(self.authorize(request).send().await?).await?;
        let rows: Vec<Row> = response.json().await?;

        debug!(collection = collection.as_str(), rows = rows.len(), "row store response");

        Ok(rows)
    }
}

#[async_trait]
impl RowStore for RestRowStore {
    async fn select(&self, collection: Collection, filter: Filter) -> Result<Vec<Row>, StoreError> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        pairs.extend(query_pairs(&filter));

        let request = self.http.get(self.url(collection)).query(&pairs);

        self.rows(collection, request).await
    }

    async fn insert(&self, collection: Collection, row: Row) -> Result<Row, StoreError> {
        let request = self
            .http
            .post(self.url(collection))
            .header("Prefer", HeaderValue::from_static(RETURN_REPRESENTATION))
            .json(&row);

        self.rows(collection, request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| missing_representation(collection))
    }

    async fn update(
        &self,
        collection: Collection,
        filter: Filter,
        patch: Row,
    ) -> Result<Vec<Row>, StoreError> {
        let request = self
            .http
            .patch(self.url(collection))
            .query(&query_pairs(&filter))
            .header("Prefer", HeaderValue::from_static(RETURN_REPRESENTATION))
            .json(&patch);

        self.rows(collection, request).await
    }

    async fn upsert(
        &self,
        collection: Collection,
        row: Row,
        key: &'static str,
    ) -> Result<Row, StoreError> {
        let request = self
            .http
            .post(self.url(collection))
            .query(&[("on_conflict", key)])
            .header("Prefer", HeaderValue::from_static(MERGE_DUPLICATES))
            .json(&row);

        self.rows(collection, request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| missing_representation(collection))
    }

    async fn delete(&self, collection: Collection, filter: Filter) -> Result<u64, StoreError> {
        let request = self
            .http
            .delete(self.url(collection))
            .query(&query_pairs(&filter))
            .header("Prefer", HeaderValue::from_static(RETURN_REPRESENTATION));

        let deleted = self.rows(collection, request).await?.len();

        Ok(u64::try_from(deleted).unwrap_or(u64::MAX))
    }
}

async fn checked(response: Response) -> Result<Response, StoreError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(StoreError::UnexpectedResponse { status, body })
}

fn missing_representation(collection: Collection) -> StoreError {
    StoreError::UnexpectedResponse {
        status: reqwest::StatusCode::OK,
        body: format!("no representation returned for {}", collection.as_str()),
    }
}

/// Query string pairs for `filter`.
fn query_pairs(filter: &Filter) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = filter
        .conditions()
        .iter()
        .map(|(column, value)| ((*column).to_string(), format!("eq.{}", literal(value))))
        .collect();

    if let Some(order) = filter.order() {
        let direction = match order.direction {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        };

        pairs.push(("order".to_string(), format!("{}.{direction}", order.column)));
    }

    if let Some(limit) = filter.max_rows() {
        pairs.push(("limit".to_string(), limit.to_string()));
    }

    pairs
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
