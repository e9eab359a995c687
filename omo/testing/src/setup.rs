use {
    crate::{
        attest,
        mocks::{message_transmitter, pool, token_messenger},
        setup_tracing_subscriber, Addressable, TestAccount, TestSuite,
    },
    omo_host::ResultExt,
    omo_types::{
        bridge::{self, BridgeInPayload},
        call_proxy, Addr, Empty,
    },
};

/// Native balance of every account in the fixture.
pub const INITIAL_NATIVE: u128 = 100;

/// Token balance minted to every funded account in the fixture.
pub const INITIAL_TOKENS: u128 = 1000;

/// What the mock transmitter pays per message.
pub const TRANSMITTER_PAYOUT: u128 = 10;

pub struct TestAccounts {
    /// Deploys and owns everything, and is the bridge's only attester.
    pub owner: TestAccount,
    pub user: TestAccount,
    pub relayer: TestAccount,
}

pub struct Contracts {
    pub bridge: Addr,
    pub call_proxy: Addr,
    pub token_messenger: Addr,
    pub message_transmitter: Addr,
    pub pool: Addr,
}

pub struct Tokens {
    /// The canonical asset: burned by the token messenger, paid out by the
    /// message transmitter.
    pub usdc: Addr,
    /// A regular token, held in custody by the bridge.
    pub pusdc: Addr,
}

/// Deploy the bridge, the call proxy and the mock collaborators.
///
/// - owner and user hold native funds;
/// - owner, the transmitter and the pool hold USDC;
/// - owner, user and the pool hold pUSDC;
/// - owner and user have approved the bridge to spend their tokens;
/// - the bridge and the proxy know each other.
pub fn setup_test() -> (TestSuite, TestAccounts, Contracts, Tokens) {
    setup_tracing_subscriber(tracing::Level::WARN);

    let mut suite = TestSuite::new();

    let accounts = TestAccounts {
        owner: TestAccount::new_random(),
        user: TestAccount::new_random(),
        relayer: TestAccount::new_random(),
    };
    let owner = accounts.owner.address();

    suite.set_native_balance(owner, INITIAL_NATIVE);
    suite.set_native_balance(accounts.user.address(), INITIAL_NATIVE);

    let tokens = Tokens {
        usdc: suite.create_token("USDC", 6),
        pusdc: suite.create_token("pUSDC", 6),
    };

    let message_transmitter = suite
        .instantiate(
            owner,
            message_transmitter::contract(),
            "message_transmitter",
            &message_transmitter::InstantiateMsg {
                attester: owner,
                token: tokens.usdc,
                amount: TRANSMITTER_PAYOUT,
                report: message_transmitter::Report::Truthful,
            },
            0,
        )
        .should_succeed();

    let token_messenger = suite
        .instantiate(
            owner,
            token_messenger::contract(),
            "token_messenger",
            &token_messenger::InstantiateMsg {
                message_transmitter,
                burn_token: tokens.usdc,
            },
            0,
        )
        .should_succeed();

    let pool = suite
        .instantiate(owner, pool::contract(), "pool", &Empty {}, 0)
        .should_succeed();

    let bridge = suite
        .instantiate(
            owner,
            omo_bridge::contract(),
            "bridge",
            &bridge::InstantiateMsg {
                token_messenger,
                attester: owner,
                fee_collector: owner,
            },
            0,
        )
        .should_succeed();

    let call_proxy = suite
        .instantiate(
            owner,
            omo_call_proxy::contract(),
            "call_proxy",
            &call_proxy::InstantiateMsg { bridge: None },
            0,
        )
        .should_succeed();

    suite
        .execute(
            owner,
            call_proxy,
            &call_proxy::ExecuteMsg::SetBridge { bridge },
            0,
        )
        .should_succeed();

    suite
        .execute(
            owner,
            bridge,
            &bridge::ExecuteMsg::SetCallProxy { call_proxy },
            0,
        )
        .should_succeed();

    for holder in [owner, message_transmitter, pool] {
        suite
            .mint_token(tokens.usdc, holder, INITIAL_TOKENS)
            .should_succeed();
    }

    for holder in [owner, accounts.user.address(), pool] {
        suite
            .mint_token(tokens.pusdc, holder, INITIAL_TOKENS)
            .should_succeed();
    }

    for spender in [owner, accounts.user.address()] {
        for token in [tokens.usdc, tokens.pusdc] {
            suite
                .approve_token(spender, token, bridge, INITIAL_TOKENS)
                .should_succeed();
        }
    }

    let contracts = Contracts {
        bridge,
        call_proxy,
        token_messenger,
        message_transmitter,
        pool,
    };

    (suite, accounts, contracts, tokens)
}

/// A payload the mock transmitter pays out on: the attested sender is the
/// address that receives the payout, and the attestation proof is the
/// transmitter attester's signature over it.
pub fn mock_bridge_in_payload(
    token: Addr,
    paid_to: Addr,
    transmitter_attester: &TestAccount,
    recipient: Addr,
    calldata: Vec<u8>,
) -> BridgeInPayload {
    BridgeInPayload {
        token: token.to_vec(),
        attested_sender: paid_to.to_vec(),
        attestation: transmitter_attester.sign(&paid_to).to_vec(),
        recipient: recipient.to_vec(),
        calldata,
    }
}

/// Encode a payload and attest it by the given bridge attesters.
pub fn bridge_in_msg<'a, I>(payload: &BridgeInPayload, attesters: I) -> bridge::ExecuteMsg
where
    I: IntoIterator<Item = &'a TestAccount>,
{
    let payload = payload.encode();
    let attestation = attest(&payload, attesters);

    bridge::ExecuteMsg::BridgeIn {
        payload: payload.into(),
        attestation: attestation.into(),
    }
}
