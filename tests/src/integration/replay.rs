//! # Replay & Tampering
//!
//! A signature authorizes exactly one call, on exactly one account, at
//! exactly one nonce.

#[cfg(test)]
mod tests {
    use crate::fixtures::address_registry::SET_L1_ADDRESS;
    use crate::fixtures::{AddressRegistry, FixtureError, Network, Signer};
    use crate::integration::init_test_logging;
    use account_abstraction::prelude::*;
    use account_abstraction::{DispatchError, RegistryError};
    use account_crypto::selector_from_name;
    use std::sync::Arc;

    struct World {
        network: Network,
        registry_address: Felt,
        signer: Signer,
        account: Felt,
    }

    fn world() -> World {
        init_test_logging();
        let network = Network::new();
        let registry_address =
            network.deploy_service(Arc::new(AddressRegistry::new()) as Arc<dyn ContractService>);
        let signer = Signer::random();
        let account = network.deploy_account(signer.public_key()).unwrap();
        World {
            network,
            registry_address,
            signer,
            account,
        }
    }

    fn set_l1(world: &World, value: u64) -> CallRequest {
        CallRequest::new(
            world.registry_address,
            selector_from_name(SET_L1_ADDRESS),
            vec![Felt::from(value)],
        )
    }

    fn submit(
        world: &World,
        account: &Felt,
        call: &CallRequest,
        signature: &[Felt],
    ) -> Result<Result<ExecutionOutcome, AccountError>, FixtureError> {
        world.network.with_account(account, |acct| {
            acct.execute(call.target, call.selector, call.calldata.clone(), signature)
        })
    }

    #[test]
    fn test_signature_single_use() {
        let world = world();
        let call = set_l1(&world, 1);
        let signature = world.signer.sign_call(&call, world.account, 0).unwrap();

        assert!(matches!(submit(&world, &world.account, &call, &signature), Ok(Ok(_))));
        for _ in 0..3 {
            assert!(matches!(
                submit(&world, &world.account, &call, &signature),
                Ok(Err(AccountError::InvalidSignature(_)))
            ));
        }
        assert_eq!(world.network.nonce(&world.account), Ok(1));
    }

    #[test]
    fn test_presigned_future_nonce_waits_its_turn() {
        let world = world();
        let first = set_l1(&world, 1);
        let second = set_l1(&world, 2);
        let early = world.signer.sign_call(&second, world.account, 1).unwrap();

        // Not valid yet at nonce 0.
        assert!(matches!(
            submit(&world, &world.account, &second, &early),
            Ok(Err(AccountError::InvalidSignature(_)))
        ));

        let now = world.signer.sign_call(&first, world.account, 0).unwrap();
        submit(&world, &world.account, &first, &now).unwrap().unwrap();
        submit(&world, &world.account, &second, &early).unwrap().unwrap();
        assert_eq!(world.network.nonce(&world.account), Ok(2));
    }

    #[test]
    fn test_cross_account_replay_rejected() {
        let world = world();
        // Same controlling key on a second account.
        let twin = world
            .network
            .deploy_account(world.signer.public_key())
            .unwrap();
        let call = set_l1(&world, 7);
        let signature = world.signer.sign_call(&call, world.account, 0).unwrap();

        submit(&world, &world.account, &call, &signature)
            .unwrap()
            .unwrap();
        assert!(matches!(
            submit(&world, &twin, &call, &signature),
            Ok(Err(AccountError::InvalidSignature(_)))
        ));
        assert_eq!(world.network.nonce(&twin), Ok(0));
    }

    #[test]
    fn test_every_field_is_bound() {
        let world = world();
        let call = set_l1(&world, 1);
        let signature = world.signer.sign_call(&call, world.account, 0).unwrap();

        let tampered = [
            CallRequest::new(Felt::from(1), call.selector, call.calldata.clone()),
            CallRequest::new(call.target, Felt::from(1), call.calldata.clone()),
            CallRequest::new(call.target, call.selector, vec![Felt::from(2)]),
            CallRequest::new(call.target, call.selector, vec![Felt::from(1), Felt::zero()]),
        ];
        for request in &tampered {
            assert!(matches!(
                submit(&world, &world.account, request, &signature),
                Ok(Err(AccountError::InvalidSignature(_)))
            ));
        }
        assert_eq!(world.network.nonce(&world.account), Ok(0));
    }

    #[test]
    fn test_malleated_signature_rejected() {
        let world = world();
        let call = set_l1(&world, 1);
        let signature = world.signer.sign_call(&call, world.account, 0).unwrap();

        let swapped = [signature[1], signature[0]];
        assert!(submit(&world, &world.account, &call, &swapped)
            .unwrap()
            .is_err());

        let truncated = &signature[..1];
        assert_eq!(
            submit(&world, &world.account, &call, truncated),
            Ok(Err(AccountError::MalformedSignature { len: 1 }))
        );
        assert_eq!(world.network.nonce(&world.account), Ok(0));
    }

    #[test]
    fn test_failed_dispatch_burns_signature() {
        let world = world();
        // Nothing deployed at this target.
        let call = CallRequest::new(Felt::from(0xDEAD), Felt::one(), vec![]);
        let signature = world.signer.sign_call(&call, world.account, 0).unwrap();

        let first = submit(&world, &world.account, &call, &signature).unwrap();
        assert_eq!(
            first,
            Err(AccountError::Dispatch(DispatchError::ServiceNotFound(
                Felt::from(0xDEAD)
            )))
        );
        assert_eq!(world.network.nonce(&world.account), Ok(1));

        // The consumed signature cannot be retried.
        assert!(matches!(
            submit(&world, &world.account, &call, &signature),
            Ok(Err(AccountError::InvalidSignature(_)))
        ));
    }

    #[test]
    fn test_unknown_account() {
        let world = world();
        let call = set_l1(&world, 1);
        let signature = world.signer.sign_call(&call, world.account, 0).unwrap();

        assert_eq!(
            submit(&world, &Felt::from(1), &call, &signature),
            Err(FixtureError::Registry(RegistryError::UnknownAccount(
                Felt::from(1)
            )))
        );
    }
}
