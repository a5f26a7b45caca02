//! # Inbound Ports (Driving Ports / API)
//!
//! The account's public contract, independent of transport.

use crate::domain::entities::ExecutionOutcome;
use crate::domain::errors::AccountError;
use crate::domain::value_objects::Felt;

/// Single-key account API.
///
/// | Operation | Precondition |
/// |-----------|--------------|
/// | `initialize` | Uninitialized |
/// | `get_public_key` / `get_self_address` / `get_nonce` | none |
/// | `set_public_key` | Active, caller is the account |
/// | `is_valid_signature` | Active |
/// | `execute` | Active |
pub trait AccountApi: Send {
    /// Set the controlling key and the account's own address; move to Active.
    ///
    /// # Errors
    /// * `AlreadyInitialized` - second call; nothing is changed
    fn initialize(&mut self, public_key: Felt, self_address: Felt) -> Result<(), AccountError>;

    /// Stored public key (zero before `initialize`).
    fn get_public_key(&self) -> Result<Felt, AccountError>;

    /// The account's own address (zero before `initialize`).
    fn get_self_address(&self) -> Result<Felt, AccountError>;

    /// Current nonce (zero before the first `execute`).
    fn get_nonce(&self) -> Result<u64, AccountError>;

    /// Overwrite the public key. Only the account itself may call this.
    ///
    /// # Errors
    /// * `NotInitialized`
    /// * `Unauthorized` - caller is not the account
    fn set_public_key(&mut self, new_public_key: Felt) -> Result<(), AccountError>;

    /// Check `signature` over an arbitrary caller-supplied `digest`.
    ///
    /// `Ok(())` means valid. Never mutates state.
    ///
    /// # Errors
    /// * `NotInitialized`
    /// * `MalformedSignature` - not exactly `(r, s)`
    /// * `InvalidSignature`
    fn is_valid_signature(&self, digest: Felt, signature: &[Felt]) -> Result<(), AccountError>;

    /// Authorize and forward one call.
    ///
    /// The nonce is consumed before dispatch: a failed downstream call still
    /// advances it, and the signature can never be replayed.
    ///
    /// # Errors
    /// * `NotInitialized`, `MalformedSignature`, `InvalidSignature` - state unchanged
    /// * `Dispatch` - the nonce has already advanced
    fn execute(
        &mut self,
        target: Felt,
        selector: Felt,
        calldata: Vec<Felt>,
        signature: &[Felt],
    ) -> Result<ExecutionOutcome, AccountError>;
}
