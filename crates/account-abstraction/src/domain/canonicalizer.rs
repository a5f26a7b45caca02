//! # Message Canonicalization
//!
//! Folds a call description, the account identity and a nonce into one digest:
//!
//! ```text
//! calldata_digest = fold(calldata)          fold([]) = 0, fold([x]) = x,
//!                                           fold([x, ..rest]) = H(fold(rest), x)
//! digest = H(H(H(H(target, selector), calldata_digest), self_address), nonce)
//! ```
//!
//! `H` is [`account_crypto::pair_hash`].

use super::entities::CallRequest;
use super::value_objects::Felt;
use account_crypto::pair_hash;

/// Digest builder for `execute` authorizations.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCanonicalizer;

impl MessageCanonicalizer {
    /// Create a canonicalizer.
    pub fn new() -> Self {
        Self
    }

    /// Digest binding `call` to one account and one nonce.
    #[must_use]
    pub fn digest(&self, call: &CallRequest, self_address: &Felt, nonce: u64) -> Felt {
        let digest = pair_hash(&call.target, &call.selector);
        let digest = pair_hash(&digest, &self.hash_calldata(&call.calldata));
        let digest = pair_hash(&digest, self_address);
        pair_hash(&digest, &Felt::from(nonce))
    }

    /// Right-to-left fold of the calldata, iterative so argument count never
    /// limits stack depth.
    #[must_use]
    pub fn hash_calldata(&self, calldata: &[Felt]) -> Felt {
        let mut remaining = calldata.iter().rev();
        match remaining.next() {
            None => Felt::zero(),
            Some(last) => remaining.fold(*last, |acc, element| pair_hash(&acc, element)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
