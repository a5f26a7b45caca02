//! # Keccak-256 Hashing
//!
//! The two-input compression function used by message canonicalization,
//! plus entry-point selector derivation.

use crate::Felt;
use sha3::{Digest, Keccak256};

/// Keccak-256 output (256-bit).
pub type Hash = [u8; 32];

/// Selectors and storage keys keep the low 250 bits of the Keccak digest.
const SELECTOR_TOP_BYTE_MASK: u8 = 0x03;

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Big-endian 32-byte encoding of a field element.
pub fn felt_to_bytes(value: &Felt) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes
}

/// Read a field element from its big-endian encoding.
pub fn felt_from_bytes(bytes: &[u8; 32]) -> Felt {
    Felt::from_big_endian(bytes)
}

/// Collision-resistant compression `H(a, b) = keccak256(be(a) || be(b))`.
///
/// Order matters: `pair_hash(a, b) != pair_hash(b, a)` unless `a == b`.
pub fn pair_hash(a: &Felt, b: &Felt) -> Felt {
    let mut hasher = Keccak256::new();
    hasher.update(felt_to_bytes(a));
    hasher.update(felt_to_bytes(b));
    let digest: Hash = hasher.finalize().into();
    felt_from_bytes(&digest)
}

/// Derive an entry-point selector (or storage key) from its ASCII name.
pub fn selector_from_name(name: &str) -> Felt {
    let mut digest = keccak256(name.as_bytes());
    digest[0] &= SELECTOR_TOP_BYTE_MASK;
    felt_from_bytes(&digest)
}
