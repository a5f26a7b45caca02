//! # Signature Verification
//!
//! Accepts only the two-component `(r, s)` form and checks it against the
//! account's stored x-only key.

use super::errors::AccountError;
use super::value_objects::Felt;
use account_crypto::{verify_prehash, Signature};

/// Number of components in an account signature.
pub const SIGNATURE_LEN: usize = 2;

/// Parse the wire form `[r, s]`.
pub fn parse_signature(parts: &[Felt]) -> Result<Signature, AccountError> {
    match parts {
        [r, s] => Ok(Signature::new(*r, *s)),
        _ => Err(AccountError::MalformedSignature { len: parts.len() }),
    }
}

/// Verifier bound to one public key.
#[derive(Debug, Clone, Copy)]
pub struct SignatureVerifier {
    public_key: Felt,
}

impl SignatureVerifier {
    /// Bind to the account's stored key.
    pub fn new(public_key: Felt) -> Self {
        Self { public_key }
    }

    /// Verify `signature` over `digest`.
    ///
    /// # Errors
    /// * `MalformedSignature` - not exactly two components
    /// * `InvalidSignature` - out of range, malleable, undecodable key, or mismatch
    pub fn verify(&self, digest: &Felt, signature: &[Felt]) -> Result<(), AccountError> {
        let signature = parse_signature(signature)?;
        verify_prehash(&self.public_key, digest, &signature).map_err(AccountError::InvalidSignature)
    }
}
