//! # Account Registry
//!
//! Host-side table of live accounts, keyed by address.
//!
//! Operations on one account are serialized by its own mutex; distinct
//! accounts proceed in parallel. The map shard lock is released before the
//! account lock is taken, so a long `execute` never blocks lookups.

use crate::domain::value_objects::Felt;
use crate::ports::inbound::AccountApi;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Registry failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An account is already registered at this address.
    #[error("account already registered at {0:#x}")]
    AlreadyRegistered(Felt),

    /// No account is registered at this address.
    #[error("no account registered at {0:#x}")]
    UnknownAccount(Felt),
}

/// Address-keyed set of accounts with per-account serialization.
pub struct AccountRegistry<A> {
    accounts: DashMap<Felt, Arc<Mutex<A>>>,
}

impl<A> Default for AccountRegistry<A> {
    fn default() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }
}

impl<A: AccountApi> AccountRegistry<A> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `account` under `address`.
    pub fn register(&self, address: Felt, account: A) -> Result<(), RegistryError> {
        match self.accounts.entry(address) {
            Entry::Occupied(_) => Err(RegistryError::AlreadyRegistered(address)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(account)));
                info!(address = %format_args!("{address:#x}"), "Account registered");
                Ok(())
            }
        }
    }

    /// Run `f` with exclusive access to the account at `address`.
    pub fn with_account<R>(
        &self,
        address: &Felt,
        f: impl FnOnce(&mut A) -> R,
    ) -> Result<R, RegistryError> {
        let handle = self
            .accounts
            .get(address)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(RegistryError::UnknownAccount(*address))?;

        debug!(address = %format_args!("{address:#x}"), "Acquiring account");
        let mut account = handle.lock();
        Ok(f(&mut account))
    }

    /// Whether an account is registered at `address`.
    #[must_use]
    pub fn contains(&self, address: &Felt) -> bool {
        self.accounts.contains_key(address)
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// True if no account is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
