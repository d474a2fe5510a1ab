//! Key-value store abstraction shared by the fee modules.

use serde::{Serialize, de::DeserializeOwned};

use crate::StoreError;

/// Ordered byte-keyed store.
///
/// The trait is object safe so module keepers can operate on a
/// `&mut dyn KvStore` regardless of whether it is the committed backend or
/// a transaction branch layered over it.
pub trait KvStore {
    /// Reads the value stored at `key`.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Returns true if a value is stored at `key`.
    fn has(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Stores `value` at `key`.
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StoreError>;

    /// Removes the value at `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError>;

    /// Returns every entry whose key starts with `prefix`, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;
}

/// Typed JSON accessors over any [`KvStore`].
pub trait KvStoreExt: KvStore {
    /// Reads and decodes the JSON value at `key`.
    fn get_json<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, StoreError> {
        self.get(key)?
            .map(|bytes| serde_json::from_slice(&bytes).map_err(|e| StoreError::codec(key, e)))
            .transpose()
    }

    /// Encodes `value` as JSON and stores it at `key`.
    fn set_json<T: Serialize>(&mut self, key: &[u8], value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value).map_err(|e| StoreError::codec(key, e))?;
        self.set(key, bytes)
    }

    /// Decodes every JSON value under `prefix`, in ascending key order.
    fn scan_json<T: DeserializeOwned>(&self, prefix: &[u8]) -> Result<Vec<T>, StoreError> {
        self.prefix_scan(prefix)?
            .into_iter()
            .map(|(key, bytes)| serde_json::from_slice(&bytes).map_err(|e| StoreError::codec(&key, e)))
            .collect()
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}
