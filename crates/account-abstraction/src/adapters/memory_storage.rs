//! # In-Memory Storage
//!
//! HashMap-backed account storage. Writes land before `write` returns.

use crate::domain::errors::StorageError;
use crate::domain::value_objects::{Felt, StorageKey};
use crate::ports::outbound::AccountStorage;
use std::collections::HashMap;

/// In-memory key-value store for one account.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    values: HashMap<StorageKey, Felt>,
    writes: u64,
    read_only: bool,
}

impl InMemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Reject every subsequent write with `StorageError::Unavailable`.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

impl AccountStorage for InMemoryStorage {
    fn read(&self, key: &StorageKey) -> Result<Felt, StorageError> {
        Ok(self.values.get(key).copied().unwrap_or_default())
    }

    fn write(&mut self, key: StorageKey, value: Felt) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Unavailable("store is read-only".to_string()));
        }
        self.values.insert(key, value);
        self.writes += 1;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
