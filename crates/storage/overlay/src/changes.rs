//! Pending write tracking with merge capability.

use std::collections::BTreeMap;

use levy_traits::{KvStore, StoreError};

/// Pending writes keyed by store key; `None` marks a deletion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl ChangeSet {
    /// Create an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys with pending changes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Records a write.
    pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.entries.insert(key, Some(value));
    }

    /// Records a deletion.
    pub fn remove(&mut self, key: Vec<u8>) {
        self.entries.insert(key, None);
    }

    /// Looks up a pending change. The outer `None` means the key is untouched.
    pub fn lookup(&self, key: &[u8]) -> Option<Option<&[u8]>> {
        self.entries.get(key).map(Option::as_deref)
    }

    /// Pending changes whose key starts with `prefix`, in key order.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a [u8],
    ) -> impl Iterator<Item = (&'a Vec<u8>, &'a Option<Vec<u8>>)> + 'a {
        self.entries.range(prefix.to_vec()..).take_while(move |(key, _)| key.starts_with(prefix))
    }

    /// Merge a newer change set into this one; newer entries win.
    pub fn merge(&mut self, newer: Self) {
        self.entries.extend(newer.entries);
    }

    /// Writes every pending change into `store`.
    pub fn apply_to(self, store: &mut dyn KvStore) -> Result<(), StoreError> {
        for (key, value) in self.entries {
            match value {
                Some(value) => store.set(&key, value)?,
                None => store.delete(&key)?,
            }
        }
        Ok(())
    }
}
