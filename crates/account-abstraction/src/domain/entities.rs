//! # Domain Entities
//!
//! Core data structures for the account.

use super::value_objects::Felt;
use serde::{Deserialize, Serialize};

// =============================================================================
// ACCOUNT STATE
// =============================================================================

/// Snapshot of the persisted account record.
///
/// All fields read as zero / `false` before `initialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// The only credential the account accepts.
    pub public_key: Felt,
    /// Number of successful `execute` calls so far.
    pub nonce: u64,
    /// Set exactly once, never cleared.
    pub initialized: bool,
    /// The account's own identity, bound into every digest.
    pub self_address: Felt,
}

/// Account lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Before `initialize`.
    Uninitialized,
    /// After `initialize`. Terminal.
    Active,
}

impl AccountState {
    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        if self.initialized {
            Lifecycle::Active
        } else {
            Lifecycle::Uninitialized
        }
    }
}

// =============================================================================
// CALL REQUEST
// =============================================================================

/// One outbound call, built per `execute` and dropped when it returns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    /// Destination service
    pub target: Felt,
    /// Destination entry point
    pub selector: Felt,
    /// Arguments, in order
    pub calldata: Vec<Felt>,
}

impl CallRequest {
    /// Create a call request.
    pub fn new(target: Felt, selector: Felt, calldata: Vec<Felt>) -> Self {
        Self {
            target,
            selector,
            calldata,
        }
    }

    /// Number of arguments.
    #[must_use]
    pub fn calldata_size(&self) -> usize {
        self.calldata.len()
    }
}

// =============================================================================
// EXECUTION OUTCOME
// =============================================================================

/// Result of an authorized and dispatched call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// The downstream response, unmodified.
    pub response: Vec<Felt>,
}

impl ExecutionOutcome {
    /// Wrap a downstream response.
    pub fn new(response: Vec<Felt>) -> Self {
        Self { response }
    }

    /// Size of the downstream response.
    #[must_use]
    pub fn response_len(&self) -> usize {
        self.response.len()
    }
}
