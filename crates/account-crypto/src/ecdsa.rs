//! # ECDSA Signatures (secp256k1, x-only keys)
//!
//! An account credential is a single field element: the x-coordinate of the
//! controlling public key. Verification lifts it to both candidate points.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S enforced on verification (EIP-2)
//! - Range checks on `r` and `s` use constant-time comparisons

use crate::hashing::{felt_from_bytes, felt_to_bytes};
use crate::{CryptoError, Felt};
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature as K256Signature, SigningKey, VerifyingKey};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// SEC1 compressed-point prefixes for even and odd y.
const SEC1_PARITY_PREFIXES: [u8; 2] = [0x02, 0x03];

/// ECDSA signature as its two field-element components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    /// R component
    pub r: Felt,
    /// S component
    pub s: Felt,
}

impl Signature {
    /// Create from components.
    pub fn new(r: Felt, s: Felt) -> Self {
        Self { r, s }
    }

    /// The `[r, s]` wire form carried by account calls.
    pub fn to_felts(&self) -> [Felt; 2] {
        [self.r, self.s]
    }
}

/// Verify `signature` over the 32-byte prehash `digest` against an x-only key.
///
/// Checks, in order:
/// 1. `r` and `s` are in `[1, n-1]`
/// 2. `s` is in the lower half of the curve order
/// 3. `public_key` is the x-coordinate of a curve point
/// 4. the signature verifies for one of the two points with that x-coordinate
pub fn verify_prehash(
    public_key: &Felt,
    digest: &Felt,
    signature: &Signature,
) -> Result<(), CryptoError> {
    let r = felt_to_bytes(&signature.r);
    let s = felt_to_bytes(&signature.s);

    if !is_valid_scalar(&r) || !is_valid_scalar(&s) {
        return Err(CryptoError::ScalarOutOfRange);
    }

    if !is_low_s(&s) {
        return Err(CryptoError::MalleableSignature);
    }

    let candidates = lift_x(public_key)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&r);
    sig_bytes[32..].copy_from_slice(&s);
    let sig =
        K256Signature::from_slice(&sig_bytes).map_err(|_| CryptoError::ScalarOutOfRange)?;

    let prehash = felt_to_bytes(digest);
    if candidates
        .iter()
        .any(|key| key.verify_prehash(&prehash, &sig).is_ok())
    {
        Ok(())
    } else {
        Err(CryptoError::SignatureVerificationFailed)
    }
}

/// Both curve points whose x-coordinate is `x`.
fn lift_x(x: &Felt) -> Result<Vec<VerifyingKey>, CryptoError> {
    let x_bytes = felt_to_bytes(x);

    let keys: Vec<VerifyingKey> = SEC1_PARITY_PREFIXES
        .iter()
        .filter_map(|prefix| {
            let mut compressed = [0u8; 33];
            compressed[0] = *prefix;
            compressed[1..].copy_from_slice(&x_bytes);
            VerifyingKey::from_sec1_bytes(&compressed).ok()
        })
        .collect();

    if keys.is_empty() {
        Err(CryptoError::InvalidPublicKey)
    } else {
        Ok(keys)
    }
}

/// Constant-time `a < b` over big-endian 32-byte values.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for (a_byte, b_byte) in a.iter().zip(b.iter()) {
        let not_decided = !(less | greater);
        let byte_less = Choice::from(u8::from(a_byte < b_byte));
        let byte_greater = Choice::from(u8::from(a_byte > b_byte));

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less
}

/// S must be STRICTLY LESS THAN half the order.
fn is_low_s(s: &[u8; 32]) -> bool {
    ct_less_than(s, &SECP256K1_HALF_ORDER).into()
}

/// Scalar is non-zero and below the curve order.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let valid = !is_zero & ct_less_than(scalar, &SECP256K1_ORDER);
    valid.into()
}

/// secp256k1 keypair held by whoever controls an account.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes). The moved-in copy is wiped.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(bytes);
        let signing_key = SigningKey::from_bytes((&*bytes).into())
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// The x-only public key stored by an account.
    pub fn public_key(&self) -> Felt {
        let point = self.signing_key.verifying_key().to_encoded_point(true);
        let mut x = [0u8; 32];
        x.copy_from_slice(&point.as_bytes()[1..33]);
        felt_from_bytes(&x)
    }

    /// Sign a 32-byte digest (deterministic RFC 6979, low-S).
    pub fn sign_prehash(&self, digest: &Felt) -> Result<Signature, CryptoError> {
        let sig: K256Signature = self
            .signing_key
            .sign_prehash(&felt_to_bytes(digest))
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let bytes: [u8; 64] = sig.to_bytes().into();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(Signature::new(felt_from_bytes(&r), felt_from_bytes(&s)))
    }

    /// Secret key bytes, wiped when the returned buffer drops.
    ///
    /// The `SigningKey` itself zeroizes on drop.
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes().into())
    }
}
