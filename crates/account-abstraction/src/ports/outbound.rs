//! # Driven Ports (SPI - Outbound)
//!
//! The collaborators an account depends on:
//! - Persistent key-value storage for its own fields
//! - Call dispatch to other services
//! - The identity of whoever is calling right now

use crate::domain::entities::CallRequest;
use crate::domain::errors::{DispatchError, StorageError};
use crate::domain::value_objects::{Felt, StorageKey};
use std::sync::Arc;

// =============================================================================
// STORAGE
// =============================================================================

/// Key-value store holding one account's fields.
///
/// Never-written keys read as zero. A write is durable once it returns.
pub trait AccountStorage: Send {
    /// Read the value at `key`.
    fn read(&self, key: &StorageKey) -> Result<Felt, StorageError>;

    /// Write `value` at `key`.
    fn write(&mut self, key: StorageKey, value: Felt) -> Result<(), StorageError>;
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Forwards an authorized call to another service.
pub trait CallDispatcher: Send + Sync {
    /// Invoke `call` on behalf of `caller` and return the service's response.
    ///
    /// # Errors
    /// * `ServiceNotFound` - nothing is deployed at `call.target`
    /// * `UnknownSelector` - the service has no such entry point
    /// * `MalformedCalldata` - wrong argument count
    /// * `Reverted` - the service rejected the call
    fn dispatch(&self, caller: &Felt, call: &CallRequest) -> Result<Vec<Felt>, DispatchError>;
}

impl<T: CallDispatcher + ?Sized> CallDispatcher for Arc<T> {
    fn dispatch(&self, caller: &Felt, call: &CallRequest) -> Result<Vec<Felt>, DispatchError> {
        (**self).dispatch(caller, call)
    }
}

// =============================================================================
// CALLER IDENTITY
// =============================================================================

/// Who is invoking the current account operation.
pub trait CallerIdentity: Send + Sync {
    /// Address of the current caller.
    fn caller_address(&self) -> Felt;
}

impl<T: CallerIdentity + ?Sized> CallerIdentity for Arc<T> {
    fn caller_address(&self) -> Felt {
        (**self).caller_address()
    }
}

// =============================================================================
// TESTS
// =============================================================================
