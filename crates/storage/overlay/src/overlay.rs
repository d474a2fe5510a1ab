use std::collections::BTreeMap;

use levy_traits::{KvStore, StoreError};

use crate::ChangeSet;

/// Store branch that layers pending writes on top of a read-only base.
///
/// Reads consult the pending changes first and fall back to the base.
/// Writes never reach the base: call [`OverlayStore::into_changes`] and
/// apply the result to commit, or drop the overlay to discard.
pub struct OverlayStore<'a> {
    base: &'a dyn KvStore,
    changes: ChangeSet,
}

impl std::fmt::Debug for OverlayStore<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayStore").field("pending", &self.changes.len()).finish_non_exhaustive()
    }
}

impl<'a> OverlayStore<'a> {
    /// Create an empty branch over `base`.
    #[must_use]
    pub fn new(base: &'a dyn KvStore) -> Self {
        Self::with_changes(base, ChangeSet::new())
    }

    /// Resume a branch over `base` from previously collected changes.
    #[must_use]
    pub const fn with_changes(base: &'a dyn KvStore, changes: ChangeSet) -> Self {
        Self { base, changes }
    }

    /// Pending changes held by this branch.
    pub const fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Consume the branch, returning its pending changes.
    pub fn into_changes(self) -> ChangeSet {
        self.changes
    }
}

impl KvStore for OverlayStore<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        match self.changes.lookup(key) {
            Some(value) => Ok(value.map(<[u8]>::to_vec)),
            None => self.base.get(key),
        }
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StoreError> {
        self.changes.insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError> {
        self.changes.remove(key.to_vec());
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = self.base.prefix_scan(prefix)?.into_iter().collect();
        for (key, value) in self.changes.with_prefix(prefix) {
            match value {
                Some(value) => merged.insert(key.clone(), value.clone()),
                None => merged.remove(key),
            };
        }
        Ok(merged.into_iter().collect())
    }
}
