use {
    omo_bridge::BridgeError,
    omo_host::ResultExt,
    omo_testing::{
        bridge_in_msg, mock_bridge_in_payload, setup_test, Addressable, Asset, BalanceChange,
        TestAccount, TRANSMITTER_PAYOUT,
    },
    omo_types::{
        bridge::{BridgeIn, BridgeOut, Domain, ExecuteMsg, QueryMsg},
        call_proxy::{encode_call_data, ProxyCall},
        Addr, Addr32, SearchEvent,
    },
    proptest::prelude::*,
    std::collections::BTreeMap,
};

const DOMAIN_A: Domain = 0;
const DOMAIN_B: Domain = 6;

#[test]
fn round_trip_between_two_domains() {
    let (mut a, a_accounts, a_contracts, a_tokens) = setup_test();
    let (mut b, b_accounts, b_contracts, b_tokens) = setup_test();

    let sender = a_accounts.user.address();
    let recipient = b_accounts.user.address();

    a.execute(
        a_accounts.owner.address(),
        a_contracts.bridge,
        &ExecuteMsg::BindBridge {
            domain: DOMAIN_B,
            bridge: b_contracts.bridge.into(),
        },
        0,
    )
    .should_succeed();

    b.execute(
        b_accounts.owner.address(),
        b_contracts.bridge,
        &ExecuteMsg::BindBridge {
            domain: DOMAIN_A,
            bridge: a_contracts.bridge.into(),
        },
        0,
    )
    .should_succeed();

    a.mint_token(a_tokens.usdc, sender, TRANSMITTER_PAYOUT)
        .should_succeed();

    // Depart from A.
    let res = a
        .execute(
            sender,
            a_contracts.bridge,
            &ExecuteMsg::BridgeOut {
                token: a_tokens.usdc,
                amount: TRANSMITTER_PAYOUT,
                destination_domain: DOMAIN_B,
                recipient: recipient.into(),
                refund: sender.into(),
            },
            1,
        )
        .should_succeed();

    let departure = res.events.search_event::<BridgeOut>().remove(0);
    assert_eq!(departure.remote_bridge, Addr32::from(b_contracts.bridge));
    assert_eq!(departure.burn_nonce, Some(1));
    assert_eq!(a.token_balance(a_tokens.usdc, sender).unwrap(), 0);

    // A relayer picks up the departure and delivers it to B.
    let payload = mock_bridge_in_payload(
        b_tokens.usdc,
        b_contracts.bridge,
        &b_accounts.owner,
        Addr::try_from(departure.recipient).unwrap(),
        vec![],
    );

    b.balances().record(&recipient);

    let res = b
        .execute(
            b_accounts.relayer.address(),
            b_contracts.bridge,
            &bridge_in_msg(&payload, [&b_accounts.owner]),
            0,
        )
        .should_succeed();

    b.balances().should_change(
        &recipient,
        BTreeMap::from([(
            Asset::Token(b_tokens.usdc),
            BalanceChange::Increased(departure.amount),
        )]),
    );

    let arrival = res.events.search_event::<BridgeIn>().remove(0);
    assert_eq!(arrival.recipient, recipient);
    assert_eq!(arrival.amount, departure.amount);
    assert_eq!(arrival.sender, b_accounts.relayer.address());
    assert!(!arrival.forwarded);
}

#[test]
fn delivery_rejected_while_paused_can_be_retried() {
    let (mut suite, accounts, contracts, tokens) = setup_test();
    let owner = accounts.owner.address();
    let user = accounts.user.address();

    let payload = mock_bridge_in_payload(
        tokens.usdc,
        contracts.bridge,
        &accounts.owner,
        user,
        vec![],
    );
    let msg = bridge_in_msg(&payload, [&accounts.owner]);

    suite
        .execute(owner, contracts.bridge, &ExecuteMsg::Pause {}, 0)
        .should_succeed();

    suite
        .execute(accounts.relayer.address(), contracts.bridge, &msg, 0)
        .should_fail_with_error("Pausable: paused");

    suite
        .execute(owner, contracts.bridge, &ExecuteMsg::Unpause {}, 0)
        .should_succeed();

    // The failed attempt left nothing behind, the transmitter's nonce included.
    suite
        .execute(accounts.relayer.address(), contracts.bridge, &msg, 0)
        .should_succeed();

    assert_eq!(
        suite.token_balance(tokens.usdc, user).unwrap(),
        TRANSMITTER_PAYOUT
    );
}

#[test]
fn forwarding_to_an_account_that_is_not_a_contract() {
    let (mut suite, accounts, contracts, tokens) = setup_test();
    let user = accounts.user.address();

    let calldata = encode_call_data(accounts.relayer.address(), b"{}");
    let payload = mock_bridge_in_payload(
        tokens.usdc,
        contracts.bridge,
        &accounts.owner,
        user,
        calldata,
    );

    let res = suite
        .execute(
            accounts.relayer.address(),
            contracts.bridge,
            &bridge_in_msg(&payload, [&accounts.owner]),
            0,
        )
        .should_succeed();

    let calls = res.events.search_event::<ProxyCall>();
    assert_eq!(calls[0].target, Some(accounts.relayer.address()));
    assert!(calls[0].outcome.is_rejected());
    assert_eq!(calls[0].refunded, TRANSMITTER_PAYOUT);

    assert_eq!(
        suite.token_balance(tokens.usdc, user).unwrap(),
        TRANSMITTER_PAYOUT
    );
    assert_eq!(
        suite
            .token_balance(tokens.usdc, contracts.call_proxy)
            .unwrap(),
        0
    );
}

#[test]
fn rotating_the_attester_set() {
    let (mut suite, accounts, contracts, tokens) = setup_test();
    let owner = accounts.owner.address();
    let user = accounts.user.address();

    let new_attesters = [TestAccount::new_random(), TestAccount::new_random()];

    for attester in &new_attesters {
        suite
            .execute(
                owner,
                contracts.bridge,
                &ExecuteMsg::EnableAttester {
                    attester: attester.address(),
                },
                0,
            )
            .should_succeed();
    }

    for msg in [
        ExecuteMsg::SetSignatureThreshold { threshold: 2 },
        ExecuteMsg::DisableAttester { attester: owner },
    ] {
        suite
            .execute(owner, contracts.bridge, &msg, 0)
            .should_succeed();
    }

    suite
        .query::<_, Vec<Addr>>(contracts.bridge, &QueryMsg::Attesters {
            start_after: None,
            limit: None,
        })
        .should_succeed_and(|attesters| {
            attesters.len() == 2 && !attesters.contains(&owner)
        });

    let payload = mock_bridge_in_payload(
        tokens.usdc,
        contracts.bridge,
        &accounts.owner,
        user,
        vec![],
    );

    // The retired attester no longer counts.
    suite
        .execute(
            accounts.relayer.address(),
            contracts.bridge,
            &bridge_in_msg(&payload, [&accounts.owner, &new_attesters[0]]),
            0,
        )
        .should_fail_with_error("Invalid signature: not attester");

    suite
        .execute(
            accounts.relayer.address(),
            contracts.bridge,
            &bridge_in_msg(&payload, &new_attesters),
            0,
        )
        .should_succeed();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn bridging_out_to_an_unbound_domain_always_fails(
        use_canonical in any::<bool>(),
        amount in 0u128..1000,
        domain in any::<Domain>(),
    ) {
        let (mut suite, accounts, contracts, tokens) = setup_test();
        let token = if use_canonical { tokens.usdc } else { tokens.pusdc };

        let err = suite
            .execute(
                accounts.owner.address(),
                contracts.bridge,
                &ExecuteMsg::BridgeOut {
                    token,
                    amount,
                    destination_domain: domain,
                    recipient: accounts.user.address().into(),
                    refund: Addr32::ZERO,
                },
                0,
            )
            .unwrap_err();

        prop_assert!(matches!(
            err.downcast_ref::<BridgeError>(),
            Some(BridgeError::RouteNotEnabled { .. })
        ), "expected RouteNotEnabled, got {:?}", err);
    }

    #[test]
    fn nothing_moves_while_paused(
        amount in 1u128..1000,
        fee in 0u128..10,
    ) {
        let (mut suite, accounts, contracts, tokens) = setup_test();
        let owner = accounts.owner.address();

        suite
            .execute(
                owner,
                contracts.bridge,
                &ExecuteMsg::BindBridge {
                    domain: DOMAIN_A,
                    bridge: contracts.bridge.into(),
                },
                0,
            )
            .should_succeed();
        suite
            .execute(owner, contracts.bridge, &ExecuteMsg::Pause {}, 0)
            .should_succeed();

        let err = suite
            .execute(
                owner,
                contracts.bridge,
                &ExecuteMsg::BridgeOut {
                    token: tokens.pusdc,
                    amount,
                    destination_domain: DOMAIN_A,
                    recipient: accounts.user.address().into(),
                    refund: Addr32::ZERO,
                },
                fee,
            )
            .unwrap_err();

        prop_assert!(matches!(
            err.downcast_ref::<BridgeError>(),
            Some(BridgeError::Paused)
        ));

        let payload = mock_bridge_in_payload(
            tokens.usdc,
            contracts.bridge,
            &accounts.owner,
            accounts.user.address(),
            vec![],
        );
        let err = suite
            .execute(
                accounts.relayer.address(),
                contracts.bridge,
                &bridge_in_msg(&payload, [&accounts.owner]),
                0,
            )
            .unwrap_err();

        prop_assert!(matches!(
            err.downcast_ref::<BridgeError>(),
            Some(BridgeError::Paused)
        ));
        prop_assert_eq!(suite.native_balance(contracts.bridge), 0);
        prop_assert_eq!(suite.token_balance(tokens.pusdc, contracts.bridge).unwrap(), 0);
    }
}
