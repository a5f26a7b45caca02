//! # Account Flows
//!
//! Lifecycle, key management and service interaction through `execute`.
//!
//! ## Flows Tested:
//!
//! 1. **Reference scenario**: initialize → read → execute → replay refused
//! 2. **Address registry**: set and update the account's L1 address
//! 3. **Token**: initialize, transfer, approve, transfer_from between two accounts
//! 4. **Key management**: self-only setter, rotation through a signed self-call

#[cfg(test)]
mod tests {
    use super::super::init_test_logging;
    use crate::fixtures::address_registry::{GET_L1_ADDRESS, SET_L1_ADDRESS};
    use crate::fixtures::token::{
        APPROVE, INITIALIZE, INITIAL_SUPPLY, TRANSFER, TRANSFER_FROM,
    };
    use crate::fixtures::{AddressRegistry, FixtureError, Network, Signer, Token};
    use account_abstraction::prelude::*;
    use account_abstraction::{
        set_public_key_selector, CallerSlot, DispatchError, InMemoryStorage, MessageCanonicalizer,
        SET_PUBLIC_KEY_ENTRY_POINT,
    };
    use account_crypto::selector_from_name;
    use parking_lot::Mutex;
    use std::sync::Arc;

    const SIGNER_SECRET: u64 = 123_456_789_987_654_321;
    const L1_ADDRESS: u64 = 0x1f98_40a8_5d5a_f5bf;
    const ANOTHER_ADDRESS: u64 = 0xd9e1_ce17_f264_1f24;

    fn signer() -> Signer {
        Signer::new(Felt::from(SIGNER_SECRET)).unwrap()
    }

    fn felts(values: &[u64]) -> Vec<Felt> {
        values.iter().copied().map(Felt::from).collect()
    }

    // =========================================================================
    // REFERENCE SCENARIO
    // =========================================================================

    /// Records every call it receives.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(Felt, CallRequest)>>,
    }

    impl ContractService for Recorder {
        fn invoke(
            &self,
            caller: &Felt,
            call: &CallRequest,
        ) -> Result<Vec<Felt>, DispatchError> {
            self.calls.lock().push((*caller, call.clone()));
            Ok(vec![Felt::one()])
        }
    }

    #[test]
    fn test_reference_scenario() {
        init_test_logging();
        let recorder = Arc::new(Recorder::default());
        let directory = Arc::new(ServiceDirectory::new());
        directory.deploy(Felt::from(7), Arc::clone(&recorder) as Arc<dyn ContractService>);

        // Readback with a literal key.
        let mut literal = AccountController::new(
            InMemoryStorage::new(),
            Arc::clone(&directory),
            Arc::new(CallerSlot::default()),
        );
        literal.initialize(Felt::from(5), Felt::from(100)).unwrap();
        assert_eq!(literal.get_public_key(), Ok(Felt::from(5)));
        assert_eq!(literal.get_nonce(), Ok(0));

        // Execute with a real key.
        let signer = signer();
        let mut account = AccountController::new(
            InMemoryStorage::new(),
            Arc::clone(&directory),
            Arc::new(CallerSlot::default()),
        );
        account
            .initialize(signer.public_key(), Felt::from(100))
            .unwrap();

        let call = CallRequest::new(Felt::from(7), Felt::from(42), felts(&[1, 2]));
        let signature = signer
            .sign_digest(&MessageCanonicalizer::new().digest(&call, &Felt::from(100), 0))
            .unwrap();

        account
            .execute(Felt::from(7), Felt::from(42), felts(&[1, 2]), &signature)
            .unwrap();
        assert_eq!(account.get_nonce(), Ok(1));
        assert_eq!(
            *recorder.calls.lock(),
            vec![(Felt::from(100), call.clone())]
        );

        let replay = account.execute(Felt::from(7), Felt::from(42), felts(&[1, 2]), &signature);
        assert_eq!(
            replay.map_err(|err| err.kind()),
            Err(ErrorKind::AuthenticationFailure)
        );
        assert_eq!(account.get_nonce(), Ok(1));
        assert_eq!(recorder.calls.lock().len(), 1);
    }

    // =========================================================================
    // ADDRESS REGISTRY
    // =========================================================================

    #[test]
    fn test_set_and_update_l1_address() {
        init_test_logging();
        let network = Network::new();
        let registry = Arc::new(AddressRegistry::new());
        let registry_address =
            network.deploy_service(Arc::clone(&registry) as Arc<dyn ContractService>);
        let signer = signer();
        let account = network.deploy_account(signer.public_key()).unwrap();

        network
            .send_transaction(
                &signer,
                &account,
                registry_address,
                SET_L1_ADDRESS,
                felts(&[L1_ADDRESS]),
            )
            .unwrap();
        assert_eq!(registry.l1_address(&account), Felt::from(L1_ADDRESS));

        network
            .send_transaction(
                &signer,
                &account,
                registry_address,
                SET_L1_ADDRESS,
                felts(&[ANOTHER_ADDRESS]),
            )
            .unwrap();
        assert_eq!(registry.l1_address(&account), Felt::from(ANOTHER_ADDRESS));
        assert_eq!(network.nonce(&account), Ok(2));

        // Views are reachable through execute too.
        let outcome = network
            .send_transaction(&signer, &account, registry_address, GET_L1_ADDRESS, vec![account])
            .unwrap();
        assert_eq!(outcome.response, vec![Felt::from(ANOTHER_ADDRESS)]);
        assert_eq!(outcome.response_len(), 1);
    }

    // =========================================================================
    // TOKEN
    // =========================================================================

    struct TokenWorld {
        network: Network,
        token: Arc<Token>,
        token_address: Felt,
        signer: Signer,
        account: Felt,
    }

    fn token_world() -> TokenWorld {
        let network = Network::new();
        let token = Arc::new(Token::new());
        let token_address = network.deploy_service(Arc::clone(&token) as Arc<dyn ContractService>);
        let signer = signer();
        let account = network.deploy_account(signer.public_key()).unwrap();

        network
            .send_transaction(&signer, &account, token_address, INITIALIZE, vec![])
            .unwrap();

        TokenWorld {
            network,
            token,
            token_address,
            signer,
            account,
        }
    }

    #[test]
    fn test_token_initializer() {
        init_test_logging();
        let world = token_world();
        assert_eq!(world.token.balance_of(&world.account), Felt::from(INITIAL_SUPPLY));
        assert_eq!(world.token.total_supply(), Felt::from(INITIAL_SUPPLY));
    }

    #[test]
    fn test_token_transfer() {
        init_test_logging();
        let world = token_world();
        let recipient = Felt::from(123);

        world
            .network
            .send_transaction(
                &world.signer,
                &world.account,
                world.token_address,
                TRANSFER,
                vec![recipient, Felt::from(100)],
            )
            .unwrap();

        assert_eq!(world.token.balance_of(&world.account), Felt::from(900));
        assert_eq!(world.token.balance_of(&recipient), Felt::from(100));
        assert_eq!(world.token.total_supply(), Felt::from(INITIAL_SUPPLY));
    }

    #[test]
    fn test_insufficient_sender_funds() {
        init_test_logging();
        let world = token_world();
        let balance = world.token.balance_of(&world.account);
        let nonce = world.network.nonce(&world.account).unwrap();

        let err = world
            .network
            .send_transaction(
                &world.signer,
                &world.account,
                world.token_address,
                TRANSFER,
                vec![Felt::from(123), balance + 1],
            )
            .unwrap_err();

        assert_eq!(
            err,
            FixtureError::Account(AccountError::Dispatch(DispatchError::Reverted(
                "insufficient balance".into()
            )))
        );
        assert_eq!(world.token.balance_of(&world.account), balance);
        // The failed call still spent its nonce.
        assert_eq!(world.network.nonce(&world.account), Ok(nonce + 1));
    }

    #[test]
    fn test_token_approve() {
        init_test_logging();
        let world = token_world();
        let spender = Felt::from(123);
        assert!(world.token.allowance(&world.account, &spender).is_zero());

        world
            .network
            .send_transaction(
                &world.signer,
                &world.account,
                world.token_address,
                APPROVE,
                vec![spender, Felt::from(345)],
            )
            .unwrap();
        assert_eq!(world.token.allowance(&world.account, &spender), Felt::from(345));
    }

    #[test]
    fn test_token_transfer_from() {
        init_test_logging();
        let world = token_world();
        // Same key, distinct accounts.
        let spender = world
            .network
            .deploy_account(world.signer.public_key())
            .unwrap();
        let recipient = Felt::from(987);
        let amount = Felt::from(345);
        let previous = world.token.balance_of(&world.account);

        world
            .network
            .send_transaction(
                &world.signer,
                &world.account,
                world.token_address,
                APPROVE,
                vec![spender, amount],
            )
            .unwrap();
        world
            .network
            .send_transaction(
                &world.signer,
                &spender,
                world.token_address,
                TRANSFER_FROM,
                vec![world.account, recipient, amount],
            )
            .unwrap();

        assert_eq!(world.token.balance_of(&world.account), previous - amount);
        assert_eq!(world.token.balance_of(&recipient), amount);
        assert!(world.token.allowance(&world.account, &spender).is_zero());
        assert_eq!(world.network.nonce(&spender), Ok(1));
    }

    // =========================================================================
    // LIFECYCLE & KEY MANAGEMENT
    // =========================================================================

    #[test]
    fn test_initialize_refused_twice() {
        init_test_logging();
        let network = Network::new();
        let account = network.deploy_account(Felt::from(5)).unwrap();

        let result = network.with_account(&account, |acct| {
            acct.initialize(Felt::from(6), Felt::from(1))
        });
        assert_eq!(result, Ok(Err(AccountError::AlreadyInitialized)));
        assert_eq!(network.public_key(&account), Ok(Felt::from(5)));
        assert_eq!(
            network.with_account(&account, |acct| acct.get_self_address()),
            Ok(Ok(account))
        );
    }

    #[test]
    fn test_set_public_key_self_only() {
        init_test_logging();
        let network = Network::new();
        let signer = signer();
        let account = network.deploy_account(signer.public_key()).unwrap();

        network.set_caller(Felt::from(0xBAD));
        let result = network.with_account(&account, |acct| acct.set_public_key(Felt::from(1)));
        assert!(matches!(
            result,
            Ok(Err(AccountError::Unauthorized { .. }))
        ));
        assert_eq!(network.public_key(&account), Ok(signer.public_key()));

        network.set_caller(account);
        network
            .with_account(&account, |acct| acct.set_public_key(Felt::from(1)))
            .unwrap()
            .unwrap();
        assert_eq!(network.public_key(&account), Ok(Felt::from(1)));
    }

    #[test]
    fn test_key_rotation_through_execute() {
        init_test_logging();
        let network = Network::new();
        let registry = Arc::new(AddressRegistry::new());
        let registry_address =
            network.deploy_service(Arc::clone(&registry) as Arc<dyn ContractService>);
        let old = signer();
        let new = Signer::random();
        let account = network.deploy_account(old.public_key()).unwrap();

        assert_eq!(
            selector_from_name(SET_PUBLIC_KEY_ENTRY_POINT),
            set_public_key_selector()
        );
        network
            .send_transaction(
                &old,
                &account,
                account,
                SET_PUBLIC_KEY_ENTRY_POINT,
                vec![new.public_key()],
            )
            .unwrap();
        assert_eq!(network.public_key(&account), Ok(new.public_key()));

        let stale = network.send_transaction(
            &old,
            &account,
            registry_address,
            SET_L1_ADDRESS,
            felts(&[L1_ADDRESS]),
        );
        assert!(matches!(
            stale,
            Err(FixtureError::Account(AccountError::InvalidSignature(_)))
        ));

        network
            .send_transaction(
                &new,
                &account,
                registry_address,
                SET_L1_ADDRESS,
                felts(&[L1_ADDRESS]),
            )
            .unwrap();
        assert_eq!(registry.l1_address(&account), Felt::from(L1_ADDRESS));
        assert_eq!(network.nonce(&account), Ok(2));
    }

    #[test]
    fn test_is_valid_signature_for_off_chain_digest() {
        init_test_logging();
        let network = Network::new();
        let signer = signer();
        let other = Signer::random();
        let account = network.deploy_account(signer.public_key()).unwrap();
        let digest = Felt::from(0xC0FFEE);

        let ours = signer.sign_digest(&digest).unwrap();
        let theirs = other.sign_digest(&digest).unwrap();

        assert_eq!(
            network.with_account(&account, |acct| acct.is_valid_signature(digest, &ours)),
            Ok(Ok(()))
        );
        assert!(matches!(
            network.with_account(&account, |acct| acct.is_valid_signature(digest, &theirs)),
            Ok(Err(AccountError::InvalidSignature(_)))
        ));
        assert_eq!(network.nonce(&account), Ok(0));
    }
}
