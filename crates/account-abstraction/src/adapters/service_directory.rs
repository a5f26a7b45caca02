//! # Service Directory
//!
//! In-process call dispatch: target address → deployed service.

use crate::domain::entities::CallRequest;
use crate::domain::errors::DispatchError;
use crate::domain::value_objects::Felt;
use crate::ports::outbound::CallDispatcher;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A service reachable through the directory.
pub trait ContractService: Send + Sync {
    /// Handle `call`, made by `caller`. `call.target` is this service's address.
    fn invoke(&self, caller: &Felt, call: &CallRequest) -> Result<Vec<Felt>, DispatchError>;
}

/// Fail with `MalformedCalldata` unless `calldata` has exactly `expected` arguments.
pub fn check_arity(calldata: &[Felt], expected: usize) -> Result<(), DispatchError> {
    if calldata.len() == expected {
        Ok(())
    } else {
        Err(DispatchError::MalformedCalldata {
            expected,
            actual: calldata.len(),
        })
    }
}

/// Address-keyed registry of deployed services.
#[derive(Default)]
pub struct ServiceDirectory {
    services: RwLock<HashMap<Felt, Arc<dyn ContractService>>>,
}

impl ServiceDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy `service` at `address`, replacing anything already there.
    pub fn deploy(&self, address: Felt, service: Arc<dyn ContractService>) {
        self.services.write().insert(address, service);
    }
}

impl CallDispatcher for ServiceDirectory {
    fn dispatch(&self, caller: &Felt, call: &CallRequest) -> Result<Vec<Felt>, DispatchError> {
        // Clone the handle so the directory lock is not held across the call.
        let service = self
            .services
            .read()
            .get(&call.target)
            .cloned()
            .ok_or(DispatchError::ServiceNotFound(call.target))?;

        debug!(
            target_address = %format_args!("{:#x}", call.target),
            selector = %format_args!("{:#x}", call.selector),
            calldata_size = call.calldata_size(),
            "Dispatching call"
        );

        service.invoke(caller, call)
    }
}

// =============================================================================
// TESTS
// =============================================================================
