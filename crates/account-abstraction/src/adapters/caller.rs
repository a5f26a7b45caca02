//! # Caller Slot
//!
//! Caller identity set by the host before it invokes an account operation.

use crate::domain::value_objects::Felt;
use crate::ports::outbound::CallerIdentity;
use parking_lot::RwLock;

/// Mutable caller identity shared between a host and its accounts.
#[derive(Debug, Default)]
pub struct CallerSlot {
    caller: RwLock<Felt>,
}

impl CallerSlot {
    /// Slot holding `caller`.
    pub fn new(caller: Felt) -> Self {
        Self {
            caller: RwLock::new(caller),
        }
    }

    /// Replace the current caller.
    pub fn set(&self, caller: Felt) {
        *self.caller.write() = caller;
    }
}

impl CallerIdentity for CallerSlot {
    fn caller_address(&self) -> Felt {
        *self.caller.read()
    }
}
