//! # Domain Layer
//!
//! Canonicalization, verification, nonce and guard logic.
//! Only the nonce ledger touches storage, through the outbound port.

pub mod canonicalizer;
pub mod entities;
pub mod errors;
pub mod guard;
pub mod nonce;
pub mod value_objects;
pub mod verifier;
