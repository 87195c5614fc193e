//! Key-value settings store
//!
//! Small records that outlive a session (the food budget cycle, the session
//! token) are kept as serialized strings under fixed keys. The store is
//! injected so services can be exercised against [`MemoryStore`].

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::file_io::{read_json, write_json_atomic};
use crate::error::{FinplanError, FinplanResult};

/// String-keyed storage of opaque string values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> FinplanResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> FinplanResult<()>;

    fn remove(&self, key: &str) -> FinplanResult<()>;

    /// Read a JSON record; a value that doesn't deserialize is an error
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> FinplanResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Write a record as JSON
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> FinplanResult<()>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}

fn lock_poisoned(e: impl std::fmt::Display) -> FinplanError {
    FinplanError::Storage(format!("Key-value store lock poisoned: {}", e))
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> FinplanResult<Option<String>> {
        let values = self.values.read().map_err(lock_poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> FinplanResult<()> {
        let mut values = self.values.write().map_err(lock_poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> FinplanResult<()> {
        let mut values = self.values.write().map_err(lock_poisoned)?;
        values.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON object; every write rewrites the file atomically
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing values
    pub fn open(path: PathBuf) -> FinplanResult<Self> {
        let values: BTreeMap<String, String> = read_json(&path)?;
        debug!(path = %path.display(), keys = values.len(), "opened key-value store");
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> FinplanResult<()> {
        write_json_atomic(&self.path, values)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> FinplanResult<Option<String>> {
        let values = self.values.read().map_err(lock_poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> FinplanResult<()> {
        let mut values = self.values.write().map_err(lock_poisoned)?;
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    fn remove(&self, key: &str) -> FinplanResult<()> {
        let mut values = self.values.write().map_err(lock_poisoned)?;
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pair {
        a: i32,
        b: Option<i32>,
    }

    #[test]
    fn test_memory_store_basics() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_json_records() {
        let store = MemoryStore::new();
        store.set_json("pair", &Pair { a: 1, b: None }).unwrap();
        assert_eq!(
            store.get_json::<Pair>("pair").unwrap(),
            Some(Pair { a: 1, b: None })
        );

        store.set("pair", "{broken").unwrap();
        assert!(store.get_json::<Pair>("pair").is_err());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let store = JsonFileStore::open(path.clone()).unwrap();
        store.set("auth_token", "abc").unwrap();
        store.set("other", "x").unwrap();
        store.remove("other").unwrap();

        let reopened = JsonFileStore::open(path).unwrap();
        assert_eq!(reopened.get("auth_token").unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get("other").unwrap(), None);
    }
}
