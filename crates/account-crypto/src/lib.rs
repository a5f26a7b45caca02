//! # Account Crypto - Primitives for Single-Key Accounts
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Pairwise compression `H(a, b)`, entry-point selectors |
//! | `ecdsa` | secp256k1 | x-only public keys, prehash signing and verification |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, low-S enforced on verify (EIP-2)
//! - **Scalar checks**: `r` and `s` must lie in `[1, n-1]`, compared in constant time
//! - **x-only keys**: one field element is the whole credential

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use ecdsa::{verify_prehash, KeyPair, Signature};
pub use errors::CryptoError;
pub use hashing::{felt_from_bytes, felt_to_bytes, keccak256, pair_hash, selector_from_name};

/// A field element: the unit of every stored value, identifier and argument.
pub type Felt = primitive_types::U256;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
