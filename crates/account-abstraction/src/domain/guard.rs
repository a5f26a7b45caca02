//! # Access Guard
//!
//! Read-only precondition checks over an account snapshot.

use super::entities::{AccountState, Lifecycle};
use super::errors::AccountError;
use super::value_objects::Felt;

/// Precondition checks for one account snapshot.
#[derive(Debug, Clone, Copy)]
pub struct AccessGuard<'a> {
    state: &'a AccountState,
}

impl<'a> AccessGuard<'a> {
    /// Guard over `state`.
    pub fn new(state: &'a AccountState) -> Self {
        Self { state }
    }

    /// Fails unless the account has been initialized.
    pub fn assert_initialized(&self) -> Result<(), AccountError> {
        match self.state.lifecycle() {
            Lifecycle::Active => Ok(()),
            Lifecycle::Uninitialized => Err(AccountError::NotInitialized),
        }
    }

    /// Fails if the account has already been initialized.
    pub fn assert_uninitialized(&self) -> Result<(), AccountError> {
        match self.state.lifecycle() {
            Lifecycle::Uninitialized => Ok(()),
            Lifecycle::Active => Err(AccountError::AlreadyInitialized),
        }
    }

    /// Fails unless `caller` is the account itself.
    pub fn assert_self(&self, caller: &Felt) -> Result<(), AccountError> {
        if *caller == self.state.self_address {
            Ok(())
        } else {
            Err(AccountError::Unauthorized {
                caller: *caller,
                expected: self.state.self_address,
            })
        }
    }
}
