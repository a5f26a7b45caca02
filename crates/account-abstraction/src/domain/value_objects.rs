//! # Value Objects
//!
//! Storage layout and well-known entry points.

pub use account_crypto::Felt;
use account_crypto::selector_from_name;

use super::errors::StorageError;

/// Key in the account's key-value store.
pub type StorageKey = Felt;

/// Name of the self-call entry point that overwrites the public key.
pub const SET_PUBLIC_KEY_ENTRY_POINT: &str = "set_public_key";

/// Selector of [`SET_PUBLIC_KEY_ENTRY_POINT`].
#[must_use]
pub fn set_public_key_selector() -> Felt {
    selector_from_name(SET_PUBLIC_KEY_ENTRY_POINT)
}

// =============================================================================
// STORAGE FIELDS
// =============================================================================

/// The persisted fields of an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageField {
    /// x-only controlling key
    PublicKey,
    /// Anti-replay counter
    Nonce,
    /// Set once by `initialize`
    Initialized,
    /// The account's own identity
    SelfAddress,
}

impl StorageField {
    /// All fields, in storage order.
    pub const ALL: [Self; 4] = [
        Self::PublicKey,
        Self::Nonce,
        Self::Initialized,
        Self::SelfAddress,
    ];

    /// Field name; the storage key is derived from it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PublicKey => "public_key",
            Self::Nonce => "nonce",
            Self::Initialized => "initialized",
            Self::SelfAddress => "self_address",
        }
    }

    /// Storage key for this field.
    #[must_use]
    pub fn key(self) -> StorageKey {
        selector_from_name(self.name())
    }

    /// Decode a stored flag (0 or 1).
    pub fn decode_bool(self, value: Felt) -> Result<bool, StorageError> {
        if value.is_zero() {
            Ok(false)
        } else if value == Felt::one() {
            Ok(true)
        } else {
            Err(self.corrupted(value))
        }
    }

    /// Decode a stored counter.
    pub fn decode_u64(self, value: Felt) -> Result<u64, StorageError> {
        if value.bits() > 64 {
            return Err(self.corrupted(value));
        }
        Ok(value.low_u64())
    }

    fn corrupted(self, value: Felt) -> StorageError {
        StorageError::Corrupted {
            field: self.name(),
            value,
        }
    }
}

/// Encode a flag for storage.
#[must_use]
pub fn encode_bool(flag: bool) -> Felt {
    if flag {
        Felt::one()
    } else {
        Felt::zero()
    }
}

// =============================================================================
// TESTS
// =============================================================================
