//! # Nonce Ledger
//!
//! The anti-replay counter. Only `+1` advancement is exposed.

use super::errors::{AccountError, StorageError};
use super::value_objects::{Felt, StorageField};
use crate::ports::outbound::AccountStorage;

/// Read the persisted nonce.
pub fn read_nonce<S: AccountStorage + ?Sized>(storage: &S) -> Result<u64, StorageError> {
    let raw = storage.read(&StorageField::Nonce.key())?;
    StorageField::Nonce.decode_u64(raw)
}

/// Exclusive handle on an account's nonce.
pub struct NonceLedger<'a, S: AccountStorage + ?Sized> {
    storage: &'a mut S,
}

impl<'a, S: AccountStorage + ?Sized> NonceLedger<'a, S> {
    /// Borrow the account's storage for nonce operations.
    pub fn new(storage: &'a mut S) -> Self {
        Self { storage }
    }

    /// Current nonce.
    pub fn read(&self) -> Result<u64, StorageError> {
        read_nonce(&*self.storage)
    }

    /// Persist `current + 1` and return it.
    ///
    /// # Errors
    /// * `NonceOverflow` - the counter is at `u64::MAX`; nothing is written
    /// * `Storage` - the write did not persist
    pub fn advance(&mut self) -> Result<u64, AccountError> {
        let current = self.read()?;
        let next = current.checked_add(1).ok_or(AccountError::NonceOverflow)?;
        self.storage
            .write(StorageField::Nonce.key(), Felt::from(next))?;
        Ok(next)
    }
}
