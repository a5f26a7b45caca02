//! # Account Controller
//!
//! Application service implementing `AccountApi`.
//!
//! ## Execute Flow
//!
//! ```text
//! assert_initialized → digest(call, self_address, nonce) → verify(signature)
//!     → advance nonce (committed) → dispatch → response
//! ```
//!
//! Everything before the nonce advance is read-only, so a rejected request
//! leaves the account untouched. A failed dispatch does not roll the nonce back.
//!
//! ## Self-Calls
//!
//! A call whose target is the account's own address is handled here instead
//! of being dispatched. The only self entry point is `set_public_key`, which
//! runs with the account itself as caller.

use crate::domain::canonicalizer::MessageCanonicalizer;
use crate::domain::entities::{AccountState, CallRequest, ExecutionOutcome};
use crate::domain::errors::{AccountError, DispatchError, StorageError};
use crate::domain::guard::AccessGuard;
use crate::domain::nonce::{read_nonce, NonceLedger};
use crate::domain::value_objects::{encode_bool, set_public_key_selector, Felt, StorageField};
use crate::domain::verifier::SignatureVerifier;
use crate::ports::inbound::AccountApi;
use crate::ports::outbound::{AccountStorage, CallDispatcher, CallerIdentity};
use tracing::{debug, info, instrument, warn};

/// Single-key account bound to its storage, dispatcher and caller identity.
pub struct AccountController<S, D, C> {
    storage: S,
    dispatcher: D,
    caller: C,
    canonicalizer: MessageCanonicalizer,
}

impl<S, D, C> AccountController<S, D, C>
where
    S: AccountStorage,
    D: CallDispatcher,
    C: CallerIdentity,
{
    /// Create a controller over existing (possibly empty) storage.
    pub fn new(storage: S, dispatcher: D, caller: C) -> Self {
        Self {
            storage,
            dispatcher,
            caller,
            canonicalizer: MessageCanonicalizer::new(),
        }
    }

    /// Load the full persisted record.
    pub fn state(&self) -> Result<AccountState, StorageError> {
        let initialized = StorageField::Initialized
            .decode_bool(self.storage.read(&StorageField::Initialized.key())?)?;

        Ok(AccountState {
            public_key: self.storage.read(&StorageField::PublicKey.key())?,
            nonce: read_nonce(&self.storage)?,
            initialized,
            self_address: self.storage.read(&StorageField::SelfAddress.key())?,
        })
    }

    /// Read access to the underlying store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn apply_public_key(&mut self, caller: Felt, new_public_key: Felt) -> Result<(), AccountError> {
        let state = self.state()?;
        let guard = AccessGuard::new(&state);
        guard.assert_initialized()?;
        if let Err(err) = guard.assert_self(&caller) {
            warn!(
                caller = %format_args!("{caller:#x}"),
                "Rejected public key change from foreign caller"
            );
            return Err(err);
        }

        self.storage
            .write(StorageField::PublicKey.key(), new_public_key)?;
        info!(
            public_key = %format_args!("{new_public_key:#x}"),
            "Public key replaced"
        );
        Ok(())
    }

    fn route(&mut self, self_address: Felt, call: &CallRequest) -> Result<Vec<Felt>, AccountError> {
        if call.target == self_address {
            self.handle_self_call(call)
        } else {
            Ok(self.dispatcher.dispatch(&self_address, call)?)
        }
    }

    fn handle_self_call(&mut self, call: &CallRequest) -> Result<Vec<Felt>, AccountError> {
        if call.selector != set_public_key_selector() {
            return Err(DispatchError::UnknownSelector {
                target: call.target,
                selector: call.selector,
            }
            .into());
        }

        let &[new_public_key] = call.calldata.as_slice() else {
            return Err(DispatchError::MalformedCalldata {
                expected: 1,
                actual: call.calldata_size(),
            }
            .into());
        };

        // Past the nonce commit: report storage failures as dispatch failures.
        self.apply_public_key(call.target, new_public_key)
            .map_err(|err| DispatchError::SelfCallFailed(Box::new(err)))?;
        Ok(Vec::new())
    }
}

impl<S, D, C> AccountApi for AccountController<S, D, C>
where
    S: AccountStorage,
    D: CallDispatcher,
    C: CallerIdentity,
{
    #[instrument(skip(self))]
    fn initialize(&mut self, public_key: Felt, self_address: Felt) -> Result<(), AccountError> {
        let state = self.state()?;
        if let Err(err) = AccessGuard::new(&state).assert_uninitialized() {
            warn!("Rejected second initialize");
            return Err(err);
        }

        // `initialized` goes last: a partial write leaves the account Uninitialized.
        self.storage
            .write(StorageField::PublicKey.key(), public_key)?;
        self.storage
            .write(StorageField::SelfAddress.key(), self_address)?;
        self.storage
            .write(StorageField::Initialized.key(), encode_bool(true))?;

        info!("Account initialized");
        Ok(())
    }

    fn get_public_key(&self) -> Result<Felt, AccountError> {
        Ok(self.storage.read(&StorageField::PublicKey.key())?)
    }

    fn get_self_address(&self) -> Result<Felt, AccountError> {
        Ok(self.storage.read(&StorageField::SelfAddress.key())?)
    }

    fn get_nonce(&self) -> Result<u64, AccountError> {
        Ok(read_nonce(&self.storage)?)
    }

    #[instrument(skip(self))]
    fn set_public_key(&mut self, new_public_key: Felt) -> Result<(), AccountError> {
        let caller = self.caller.caller_address();
        self.apply_public_key(caller, new_public_key)
    }

    fn is_valid_signature(&self, digest: Felt, signature: &[Felt]) -> Result<(), AccountError> {
        let state = self.state()?;
        AccessGuard::new(&state).assert_initialized()?;
        SignatureVerifier::new(state.public_key).verify(&digest, signature)
    }

    #[instrument(skip(self, calldata, signature), fields(calldata_size = calldata.len()))]
    fn execute(
        &mut self,
        target: Felt,
        selector: Felt,
        calldata: Vec<Felt>,
        signature: &[Felt],
    ) -> Result<ExecutionOutcome, AccountError> {
        let state = self.state()?;
        AccessGuard::new(&state).assert_initialized()?;

        let call = CallRequest::new(target, selector, calldata);
        let digest = self
            .canonicalizer
            .digest(&call, &state.self_address, state.nonce);
        debug!(
            digest = %format_args!("{digest:#x}"),
            nonce = state.nonce,
            "Computed authorization digest"
        );

        if let Err(err) = SignatureVerifier::new(state.public_key).verify(&digest, signature) {
            warn!(error = %err, nonce = state.nonce, "Rejected execute authorization");
            return Err(err);
        }

        // Committed from here on: the nonce is spent even if dispatch fails.
        let nonce = NonceLedger::new(&mut self.storage).advance()?;
        info!(nonce, "Nonce advanced");

        match self.route(state.self_address, &call) {
            Ok(response) => {
                info!(response_len = response.len(), "Call dispatched");
                Ok(ExecutionOutcome::new(response))
            }
            Err(err) => {
                warn!(error = %err, nonce, "Dispatch failed after nonce was consumed");
                Err(err)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
