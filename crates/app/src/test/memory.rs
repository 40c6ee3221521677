//! In-memory stores.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use reqwest::StatusCode;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;
use uuid::Uuid;

use crate::store::{Collection, Filter, LocalStorage, Row, RowStore, StorageError, StoreError};

/// Row store holding every collection in memory, with per-collection write
/// failures for exercising error paths.
#[derive(Debug, Default)]
pub(crate) struct MemoryRowStore {
    rows: Mutex<FxHashMap<Collection, Vec<Row>>>,
    failing: Mutex<FxHashSet<Collection>>,
}

impl MemoryRowStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replace the contents of `collection`.
    pub(crate) fn seed(&self, collection: Collection, rows: Vec<Row>) {
        self.lock_rows().insert(collection, rows);
    }

    /// Current contents of `collection`.
    pub(crate) fn rows(&self, collection: Collection) -> Vec<Row> {
        self.lock_rows().get(&collection).cloned().unwrap_or_default()
    }

    /// Make every write to `collection` fail.
    pub(crate) fn fail_writes(&self, collection: Collection) {
        self.failing
            .lock()
            .expect("failing set lock poisoned")
            .insert(collection);
    }

    fn lock_rows(&self) -> MutexGuard<'_, FxHashMap<Collection, Vec<Row>>> {
        self.rows.lock().expect("row store lock poisoned")
    }

    fn check_writable(&self, collection: Collection) -> Result<(), StoreError> {
        let failing = self.failing.lock().expect("failing set lock poisoned");

        if failing.contains(&collection) {
            return Err(StoreError::UnexpectedResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: format!("{} is unavailable", collection.as_str()),
            });
        }

        Ok(())
    }
}

fn merge(target: &mut Row, patch: Row) {
    if let (Value::Object(target), Value::Object(patch)) = (target, patch) {
        target.extend(patch);
    }
}

#[async_trait]
impl RowStore for MemoryRowStore {
    async fn select(&self, collection: Collection, filter: Filter) -> Result<Vec<Row>, StoreError> {
        let mut rows: Vec<Row> = self
            .rows(collection)
            .into_iter()
            .filter(|row| filter.matches(row))
            .collect();

        filter.arrange(&mut rows);

        Ok(rows)
    }

    async fn insert(&self, collection: Collection, mut row: Row) -> Result<Row, StoreError> {
        self.check_writable(collection)?;

        if let Value::Object(fields) = &mut row {
            fields
                .entry("id")
                .or_insert_with(|| Value::String(Uuid::now_v7().to_string()));
        }

        self.lock_rows()
            .entry(collection)
            .or_default()
            .push(row.clone());

        Ok(row)
    }

    async fn update(
        &self,
        collection: Collection,
        filter: Filter,
        patch: Row,
    ) -> Result<Vec<Row>, StoreError> {
        self.check_writable(collection)?;

        let mut rows = self.lock_rows();
        let mut updated = Vec::new();

        for row in rows
            .entry(collection)
            .or_default()
            .iter_mut()
            .filter(|row| filter.matches(row))
        {
            merge(row, patch.clone());
            updated.push(row.clone());
        }

        Ok(updated)
    }

    async fn upsert(
        &self,
        collection: Collection,
        row: Row,
        key: &'static str,
    ) -> Result<Row, StoreError> {
        self.check_writable(collection)?;

        let mut rows = self.lock_rows();
        let rows = rows.entry(collection).or_default();

        if let Some(existing) = rows
            .iter_mut()
            .find(|existing| existing.get(key).is_some() && existing.get(key) == row.get(key))
        {
            merge(existing, row);

            return Ok(existing.clone());
        }

        rows.push(row.clone());

        Ok(row)
    }

    async fn delete(&self, collection: Collection, filter: Filter) -> Result<u64, StoreError> {
        self.check_writable(collection)?;

        let mut rows = self.lock_rows();
        let rows = rows.entry(collection).or_default();
        let before = rows.len();

        rows.retain(|row| !filter.matches(row));

        Ok((before - rows.len()) as u64)
    }
}

/// Local storage held in a map.
#[derive(Debug, Default)]
pub(crate) struct MemoryLocalStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryLocalStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`.
    pub(crate) fn value(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().expect("local storage lock poisoned")
    }
}

#[async_trait]
impl LocalStorage for MemoryLocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value);

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);

        Ok(())
    }
}
