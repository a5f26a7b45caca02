//! # Account Abstraction
//!
//! A single-key account: an address that accepts a call request only when it
//! carries a valid secp256k1 signature from the key the account stores, and
//! forwards the authorized call to its target service.
//!
//! ## Operations
//!
//! | Operation | Guard | Mutates |
//! |-----------|-------|---------|
//! | `initialize` | Uninitialized | public key, self address, initialized |
//! | `get_public_key` / `get_self_address` / `get_nonce` | none | nothing |
//! | `set_public_key` | Active, caller == self | public key |
//! | `is_valid_signature` | Active | nothing |
//! | `execute` | Active, signature | nonce (+1), then dispatch |
//!
//! ## Authorization Digest
//!
//! ```text
//! H(a, b)            = keccak256(be32(a) || be32(b))
//! calldata_hash      = H(H(...H(c_{n-1}, c_{n-2})..., c1), c0)    (0 if empty)
//! digest             = H(H(H(H(target, selector), calldata_hash), self_address), nonce)
//! ```
//!
//! Binding `self_address` and `nonce` into the digest makes a signature valid
//! for exactly one call on exactly one account.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/  - InMemoryStorage, CallerSlot, ServiceDirectory     │
//! │  registry.rs - AccountRegistry (per-account serialization)      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - AccountApi trait                           │
//! │  ports/outbound.rs - AccountStorage, CallDispatcher,            │
//! │                      CallerIdentity traits                      │
//! │  service.rs        - AccountController                          │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/canonicalizer.rs - MessageCanonicalizer                 │
//! │  domain/verifier.rs      - SignatureVerifier                    │
//! │  domain/nonce.rs         - NonceLedger                          │
//! │  domain/guard.rs         - AccessGuard                          │
//! │  domain/errors.rs        - AccountError, ErrorKind              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod registry;
pub mod service;

pub use adapters::{check_arity, CallerSlot, ContractService, InMemoryStorage, ServiceDirectory};
pub use domain::canonicalizer::MessageCanonicalizer;
pub use domain::entities::{AccountState, CallRequest, ExecutionOutcome, Lifecycle};
pub use domain::errors::{AccountError, DispatchError, ErrorKind, StorageError};
pub use domain::guard::AccessGuard;
pub use domain::nonce::{read_nonce, NonceLedger};
pub use domain::value_objects::{
    encode_bool, set_public_key_selector, Felt, StorageField, StorageKey,
    SET_PUBLIC_KEY_ENTRY_POINT,
};
pub use domain::verifier::{parse_signature, SignatureVerifier, SIGNATURE_LEN};
pub use ports::inbound::AccountApi;
pub use ports::outbound::{AccountStorage, CallDispatcher, CallerIdentity};
pub use registry::{AccountRegistry, RegistryError};
pub use service::AccountController;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AccountApi, AccountController, AccountError, AccountRegistry, CallDispatcher,
        CallRequest, ContractService, ErrorKind, ExecutionOutcome, Felt, ServiceDirectory,
    };
}
