//! # Error Types
//!
//! All error types for account operations.

use account_crypto::{CryptoError, Felt};
use thiserror::Error;

// =============================================================================
// STORAGE ERRORS
// =============================================================================

/// Errors from the persistent key-value store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A stored value cannot be decoded as its field's type.
    #[error("corrupted value {value:#x} for field {field}")]
    Corrupted {
        /// Field name
        field: &'static str,
        /// Raw stored value
        value: Felt,
    },

    /// The backing store rejected the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// DISPATCH ERRORS
// =============================================================================

/// Errors reported by the call-dispatch collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No service is reachable at the target.
    #[error("service not found: {0:#x}")]
    ServiceNotFound(Felt),

    /// The target does not expose the selector.
    #[error("unknown selector {selector:#x} on {target:#x}")]
    UnknownSelector {
        /// Destination service
        target: Felt,
        /// Requested entry point
        selector: Felt,
    },

    /// Calldata has the wrong number of arguments.
    #[error("malformed calldata: expected {expected} arguments, got {actual}")]
    MalformedCalldata {
        /// Arguments the entry point takes
        expected: usize,
        /// Arguments supplied
        actual: usize,
    },

    /// The downstream call reverted.
    #[error("reverted: {0}")]
    Reverted(String),

    /// A self-call failed after the nonce advance was committed.
    #[error("self-call failed: {0}")]
    SelfCallFailed(Box<AccountError>),
}

// =============================================================================
// ACCOUNT ERRORS
// =============================================================================

/// Errors returned by account operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// A guarded operation ran before `initialize`.
    #[error("account is not initialized")]
    NotInitialized,

    /// `initialize` ran a second time.
    #[error("account is already initialized")]
    AlreadyInitialized,

    /// A self-only operation was called by someone else.
    #[error("caller {caller:#x} is not the account {expected:#x}")]
    Unauthorized {
        /// Identity of the caller
        caller: Felt,
        /// The account's own address
        expected: Felt,
    },

    /// The signature is not exactly `(r, s)`.
    #[error("malformed signature: expected 2 components, got {len}")]
    MalformedSignature {
        /// Number of components supplied
        len: usize,
    },

    /// The signature does not verify against the stored key.
    #[error("invalid signature: {0}")]
    InvalidSignature(CryptoError),

    /// The nonce cannot advance any further.
    #[error("nonce overflow")]
    NonceOverflow,

    /// The authorized downstream call failed.
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// The persistence collaborator failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failure classes an account caller can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong lifecycle state or wrong caller. State unchanged.
    PreconditionFailure,
    /// Input has the wrong shape. State unchanged.
    MalformedInput,
    /// Signature rejected. No nonce advance, no dispatch.
    AuthenticationFailure,
    /// Downstream call failed after the nonce was consumed.
    DispatchFailure,
    /// Persistence failed.
    StorageFailure,
}

impl AccountError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInitialized | Self::AlreadyInitialized | Self::Unauthorized { .. } => {
                ErrorKind::PreconditionFailure
            }
            Self::MalformedSignature { .. } => ErrorKind::MalformedInput,
            Self::InvalidSignature(_) => ErrorKind::AuthenticationFailure,
            Self::Dispatch(_) => ErrorKind::DispatchFailure,
            Self::NonceOverflow | Self::Storage(_) => ErrorKind::StorageFailure,
        }
    }

    /// Whether the account nonce was consumed before this error surfaced.
    #[must_use]
    pub fn consumed_nonce(&self) -> bool {
        matches!(self, Self::Dispatch(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
