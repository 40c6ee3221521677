//! Local storage.
//!
//! Device-local key/value strings, the home of guest carts and wishlists.

use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use mockall::automock;
use tokio::{fs, sync::Mutex};

use crate::store::StorageError;

/// File name of the local storage document inside the data directory.
pub const LOCAL_STORAGE_FILE: &str = "local-storage.json";

#[automock]
#[async_trait]
pub trait LocalStorage: Send + Sync {
    /// The value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Forget `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// [`LocalStorage`] persisted as one JSON object in a file.
#[derive(Debug)]
pub struct FileLocalStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileLocalStorage {
    /// Storage backed by [`LOCAL_STORAGE_FILE`] inside `data_dir`.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(data_dir.into().join(LOCAL_STORAGE_FILE))
    }

    /// Storage backed by the file at `path`. The file is created on first
    /// write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(error) => Err(error.into()),
        }
    }

    async fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&self.path, serde_json::to_vec_pretty(entries)?).await?;

        Ok(())
    }
}

#[async_trait]
impl LocalStorage for FileLocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;

        Ok(self.read().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        let mut entries = self.read().await?;
        entries.insert(key.to_string(), value);

        self.write(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        let mut entries = self.read().await?;

        if entries.remove(key).is_some() {
            self.write(&entries).await?;
        }

        Ok(())
    }
}
