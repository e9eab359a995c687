use {
    crate::{
        BridgeError, ACCRUED_FEES, ATTESTERS, BOUND_BRIDGES, CONFIG, DISABLED_ROUTES,
        DISABLED_TOKENS, NEXT_SEQUENCE, PAUSED, SIGNATURE_THRESHOLD,
    },
    anyhow::{anyhow, ensure},
    omo_host::{MutableCtx, Response, StdResult},
    omo_types::{
        bridge::{
            BindBridge, BindBridgeBatch, BridgeIn, BridgeInPayload, BridgeOut, Config,
            DisableAttester, DisableBridgeToken, DisableRoute, Domain, EnableAttester,
            EnableBridgeToken, EnableRoute, ExecuteMsg, FeesCollected, FundRescued,
            InstantiateMsg, NativeRescued, OwnershipTransferred, Paused, SetCallProxy,
            SetFeeCollector, SetSignatureThreshold, SetTokenMessenger, UnbindBridge,
            UnbindBridgeBatch, Unpaused,
        },
        call_proxy,
        keccak256,
        messenger::{
            MessageTransmitterExecuteMsg, ReceiveMessageResponse, TokenMessengerExecuteMsg,
            TokenMessengerQueryMsg,
        },
        Addr, Addr32, CodecError, HexBinary, Secp256k1,
    },
    std::collections::BTreeSet,
};

pub fn instantiate(mut ctx: MutableCtx, msg: InstantiateMsg) -> anyhow::Result<Response> {
    ensure!(!msg.token_messenger.is_zero(), BridgeError::TokenMessengerZero);
    ensure!(!msg.attester.is_zero(), BridgeError::AttesterZero);
    ensure!(!msg.fee_collector.is_zero(), BridgeError::FeeCollectorZero);

    let owner = ctx.sender;

    CONFIG.save(ctx.storage(), &Config {
        owner,
        token_messenger: msg.token_messenger,
        fee_collector: msg.fee_collector,
        call_proxy: None,
    })?;
    PAUSED.save(ctx.storage(), &false)?;
    ATTESTERS.insert(ctx.storage(), msg.attester)?;
    SIGNATURE_THRESHOLD.save(ctx.storage(), &1)?;
    ACCRUED_FEES.save(ctx.storage(), &0)?;

    Ok(Response::new()
        .add_event(OwnershipTransferred {
            previous_owner: Addr::ZERO,
            new_owner: owner,
        })?
        .add_event(EnableAttester {
            attester: msg.attester,
        })?)
}

pub fn execute(ctx: MutableCtx, msg: ExecuteMsg) -> anyhow::Result<Response> {
    match msg {
        ExecuteMsg::BindBridge { domain, bridge } => bind_bridge(ctx, domain, bridge),
        ExecuteMsg::BindBridgeBatch { domains, bridges } => {
            bind_bridge_batch(ctx, domains, bridges)
        },
        ExecuteMsg::UnbindBridge { domain } => unbind_bridge(ctx, domain),
        ExecuteMsg::UnbindBridgeBatch { domains } => unbind_bridge_batch(ctx, domains),
        ExecuteMsg::EnableBridgeToken { token } => enable_bridge_token(ctx, token),
        ExecuteMsg::DisableBridgeToken { token } => disable_bridge_token(ctx, token),
        ExecuteMsg::EnableRoute { token, domain } => enable_route(ctx, token, domain),
        ExecuteMsg::DisableRoute { token, domain } => disable_route(ctx, token, domain),
        ExecuteMsg::EnableAttester { attester } => enable_attester(ctx, attester),
        ExecuteMsg::DisableAttester { attester } => disable_attester(ctx, attester),
        ExecuteMsg::SetSignatureThreshold { threshold } => {
            set_signature_threshold(ctx, threshold)
        },
        ExecuteMsg::SetFeeCollector { fee_collector } => set_fee_collector(ctx, fee_collector),
        ExecuteMsg::SetCallProxy { call_proxy } => set_call_proxy(ctx, call_proxy),
        ExecuteMsg::SetTokenMessenger { token_messenger } => {
            set_token_messenger(ctx, token_messenger)
        },
        ExecuteMsg::Pause {} => pause(ctx),
        ExecuteMsg::Unpause {} => unpause(ctx),
        ExecuteMsg::TransferOwnership { new_owner } => transfer_ownership(ctx, new_owner),
        ExecuteMsg::RescueFund { token } => rescue_fund(ctx, token),
        ExecuteMsg::RescueNative { to } => rescue_native(ctx, to),
        ExecuteMsg::CollectFees {} => collect_fees(ctx),
        ExecuteMsg::ExternalCall { target, msg } => external_call(ctx, target, msg),
        ExecuteMsg::BridgeOut {
            token,
            amount,
            destination_domain,
            recipient,
            refund,
        } => bridge_out(ctx, token, amount, destination_domain, recipient, refund),
        ExecuteMsg::BridgeIn {
            payload,
            attestation,
        } => bridge_in(ctx, payload, attestation),
    }
}

/// Load the config, making sure the sender is the owner.
fn load_config_as_owner(ctx: &mut MutableCtx) -> anyhow::Result<Config> {
    let cfg = CONFIG.load(ctx.storage())?;

    ensure!(ctx.sender == cfg.owner, BridgeError::NotOwner {
        sender: ctx.sender
    });

    Ok(cfg)
}

fn ensure_not_paused(ctx: &mut MutableCtx) -> anyhow::Result<()> {
    ensure!(!PAUSED.load(ctx.storage())?, BridgeError::Paused);

    Ok(())
}

// --------------------------------- registry ----------------------------------

#[inline]
fn bind_bridge(mut ctx: MutableCtx, domain: Domain, bridge: Addr32) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    BOUND_BRIDGES.save(ctx.storage(), domain, &bridge)?;

    Ok(Response::new().add_event(BindBridge { domain, bridge })?)
}

#[inline]
fn bind_bridge_batch(
    mut ctx: MutableCtx,
    domains: Vec<Domain>,
    bridges: Vec<Addr32>,
) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    ensure!(
        domains.len() == bridges.len(),
        BridgeError::InconsistentParameterLengths {
            domains: domains.len(),
            bridges: bridges.len(),
        }
    );

    for (domain, bridge) in domains.iter().zip(&bridges) {
        BOUND_BRIDGES.save(ctx.storage(), *domain, bridge)?;
    }

    Ok(Response::new().add_event(BindBridgeBatch { domains, bridges })?)
}

#[inline]
fn unbind_bridge(mut ctx: MutableCtx, domain: Domain) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    BOUND_BRIDGES.remove(ctx.storage(), domain);

    Ok(Response::new().add_event(UnbindBridge { domain })?)
}

#[inline]
fn unbind_bridge_batch(mut ctx: MutableCtx, domains: Vec<Domain>) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    for domain in &domains {
        BOUND_BRIDGES.remove(ctx.storage(), *domain);
    }

    Ok(Response::new().add_event(UnbindBridgeBatch { domains })?)
}

#[inline]
fn enable_bridge_token(mut ctx: MutableCtx, token: Addr) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    ensure!(!token.is_zero(), BridgeError::TokenZero);

    DISABLED_TOKENS.remove(ctx.storage(), token);

    Ok(Response::new().add_event(EnableBridgeToken { token })?)
}

#[inline]
fn disable_bridge_token(mut ctx: MutableCtx, token: Addr) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    ensure!(!token.is_zero(), BridgeError::TokenZero);

    DISABLED_TOKENS.insert(ctx.storage(), token)?;

    Ok(Response::new().add_event(DisableBridgeToken { token })?)
}

#[inline]
fn enable_route(mut ctx: MutableCtx, token: Addr, domain: Domain) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    ensure!(!token.is_zero(), BridgeError::TokenZero);

    DISABLED_ROUTES.remove(ctx.storage(), (token, domain));

    Ok(Response::new().add_event(EnableRoute { token, domain })?)
}

#[inline]
fn disable_route(mut ctx: MutableCtx, token: Addr, domain: Domain) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    ensure!(!token.is_zero(), BridgeError::TokenZero);

    DISABLED_ROUTES.insert(ctx.storage(), (token, domain))?;

    Ok(Response::new().add_event(DisableRoute { token, domain })?)
}

#[inline]
fn pause(mut ctx: MutableCtx) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    ensure_not_paused(&mut ctx)?;

    PAUSED.save(ctx.storage(), &true)?;

    Ok(Response::new().add_event(Paused {
        account: ctx.sender,
    })?)
}

#[inline]
fn unpause(mut ctx: MutableCtx) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    ensure!(PAUSED.load(ctx.storage())?, BridgeError::NotPaused);

    PAUSED.save(ctx.storage(), &false)?;

    Ok(Response::new().add_event(Unpaused {
        account: ctx.sender,
    })?)
}

// -------------------------------- attesters ----------------------------------

#[inline]
fn enable_attester(mut ctx: MutableCtx, attester: Addr) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    ensure!(!attester.is_zero(), BridgeError::AttesterZero);

    ATTESTERS.insert(ctx.storage(), attester)?;

    Ok(Response::new().add_event(EnableAttester { attester })?)
}

#[inline]
fn disable_attester(mut ctx: MutableCtx, attester: Addr) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    // The threshold is not adjusted. If it now exceeds the attester count, no
    // payload can pass until the owner fixes either of them.
    ATTESTERS.remove(ctx.storage(), attester);

    Ok(Response::new().add_event(DisableAttester { attester })?)
}

#[inline]
fn set_signature_threshold(mut ctx: MutableCtx, threshold: u32) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    ensure!(threshold > 0, BridgeError::InvalidSignatureThreshold);

    SIGNATURE_THRESHOLD.save(ctx.storage(), &threshold)?;

    Ok(Response::new().add_event(SetSignatureThreshold { threshold })?)
}

// ---------------------------------- config -----------------------------------

#[inline]
fn set_fee_collector(mut ctx: MutableCtx, fee_collector: Addr) -> anyhow::Result<Response> {
    let mut cfg = load_config_as_owner(&mut ctx)?;

    ensure!(!fee_collector.is_zero(), BridgeError::FeeCollectorZero);

    cfg.fee_collector = fee_collector;
    CONFIG.save(ctx.storage(), &cfg)?;

    Ok(Response::new().add_event(SetFeeCollector { fee_collector })?)
}

#[inline]
fn set_call_proxy(mut ctx: MutableCtx, call_proxy: Addr) -> anyhow::Result<Response> {
    let mut cfg = load_config_as_owner(&mut ctx)?;

    ensure!(!call_proxy.is_zero(), BridgeError::CallProxyZero);

    cfg.call_proxy = Some(call_proxy);
    CONFIG.save(ctx.storage(), &cfg)?;

    Ok(Response::new().add_event(SetCallProxy { call_proxy })?)
}

#[inline]
fn set_token_messenger(mut ctx: MutableCtx, token_messenger: Addr) -> anyhow::Result<Response> {
    let mut cfg = load_config_as_owner(&mut ctx)?;

    ensure!(!token_messenger.is_zero(), BridgeError::TokenMessengerZero);

    cfg.token_messenger = token_messenger;
    CONFIG.save(ctx.storage(), &cfg)?;

    Ok(Response::new().add_event(SetTokenMessenger { token_messenger })?)
}

#[inline]
fn transfer_ownership(mut ctx: MutableCtx, new_owner: Addr) -> anyhow::Result<Response> {
    let mut cfg = load_config_as_owner(&mut ctx)?;

    ensure!(!new_owner.is_zero(), BridgeError::OwnerZero);

    let previous_owner = cfg.owner;
    cfg.owner = new_owner;
    CONFIG.save(ctx.storage(), &cfg)?;

    Ok(Response::new().add_event(OwnershipTransferred {
        previous_owner,
        new_owner,
    })?)
}

// ---------------------------------- funds ------------------------------------

#[inline]
fn rescue_fund(mut ctx: MutableCtx, token: Addr) -> anyhow::Result<Response> {
    let cfg = load_config_as_owner(&mut ctx)?;

    let amount = ctx.token_balance(token, ctx.contract)?;
    ctx.transfer_token(token, cfg.owner, amount)?;

    Ok(Response::new().add_event(FundRescued {
        token,
        to: cfg.owner,
        amount,
    })?)
}

#[inline]
fn rescue_native(mut ctx: MutableCtx, to: Addr) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    ensure!(!to.is_zero(), BridgeError::RecipientZero);

    // Accrued fees belong to the fee collector.
    let accrued = ACCRUED_FEES.load(ctx.storage())?;
    let amount = ctx.native_balance(ctx.contract).saturating_sub(accrued);

    ctx.send_native(to, amount)?;

    Ok(Response::new().add_event(NativeRescued { to, amount })?)
}

#[inline]
fn collect_fees(mut ctx: MutableCtx) -> anyhow::Result<Response> {
    let cfg = CONFIG.load(ctx.storage())?;

    ensure!(
        ctx.sender == cfg.owner || ctx.sender == cfg.fee_collector,
        BridgeError::NotFeeCollector { sender: ctx.sender }
    );

    let amount = ACCRUED_FEES.load(ctx.storage())?;

    ACCRUED_FEES.save(ctx.storage(), &0)?;
    ctx.send_native(cfg.fee_collector, amount)?;

    Ok(Response::new().add_event(FeesCollected {
        fee_collector: cfg.fee_collector,
        amount,
    })?)
}

#[inline]
fn external_call(mut ctx: MutableCtx, target: Addr, msg: HexBinary) -> anyhow::Result<Response> {
    load_config_as_owner(&mut ctx)?;

    let res = ctx.call_raw(target, &msg, 0)?;

    let mut response = Response::new();
    response.data = res.data;

    Ok(response)
}

// -------------------------------- bridge out ---------------------------------

#[inline]
fn bridge_out(
    mut ctx: MutableCtx,
    token: Addr,
    amount: u128,
    destination_domain: Domain,
    recipient: Addr32,
    refund: Addr32,
) -> anyhow::Result<Response> {
    let cfg = CONFIG.load(ctx.storage())?;

    ensure_not_paused(&mut ctx)?;

    // The proxy holds other people's funds in transit. It must never show up
    // as the sender of a new transfer.
    ensure!(cfg.call_proxy != Some(ctx.sender), BridgeError::Forbidden);

    let remote_bridge = BOUND_BRIDGES
        .may_load(ctx.storage(), destination_domain)?
        .ok_or(BridgeError::RouteNotEnabled {
            domain: destination_domain,
        })?;

    ensure!(!recipient.is_zero(), BridgeError::RecipientZero);

    ensure!(
        !DISABLED_TOKENS.has(ctx.storage(), token),
        BridgeError::TokenNotEnabled { token }
    );

    ensure!(
        !DISABLED_ROUTES.has(ctx.storage(), (token, destination_domain)),
        BridgeError::RouteDisabled {
            token,
            domain: destination_domain,
        }
    );

    let sender = ctx.sender;
    let contract = ctx.contract;

    ctx.transfer_token_from(token, sender, contract, amount)?;

    // The canonical asset is burned here and minted on the destination domain
    // by the messenger. Everything else stays in custody.
    let is_burn_token: bool = ctx
        .querier()
        .query(cfg.token_messenger, &TokenMessengerQueryMsg::IsBurnToken {
            token,
        })?;

    let burn_nonce = if is_burn_token {
        ctx.approve_token(token, cfg.token_messenger, amount)?;

        let res = ctx.call(
            cfg.token_messenger,
            &TokenMessengerExecuteMsg::DepositForBurnWithCaller {
                amount,
                destination_domain,
                mint_recipient: remote_bridge,
                burn_token: token,
                destination_caller: remote_bridge,
            },
            0,
        )?;

        Some(res.data_as::<u64>()?.ok_or(BridgeError::MissingBurnNonce)?)
    } else {
        None
    };

    let fee_amount = ctx.funds;

    ACCRUED_FEES.update(ctx.storage(), |fees| {
        fees.checked_add(fee_amount)
            .ok_or_else(|| anyhow!("accrued fees overflow"))
    })?;

    let (sequence, _) = NEXT_SEQUENCE.increment(ctx.storage())?;

    #[cfg(feature = "tracing")]
    tracing::info!(
        sender = sender.to_string(),
        token = token.to_string(),
        amount,
        destination_domain,
        sequence,
        "Bridged out"
    );

    Ok(Response::new().add_event(BridgeOut {
        sender,
        token,
        amount,
        destination_domain,
        sequence,
        fee_amount,
        recipient,
        refund,
        native_value: ctx.funds,
        remote_bridge,
        burn_nonce,
    })?)
}

// --------------------------------- bridge in ---------------------------------

#[inline]
fn bridge_in(
    mut ctx: MutableCtx,
    payload: HexBinary,
    attestation: HexBinary,
) -> anyhow::Result<Response> {
    let cfg = CONFIG.load(ctx.storage())?;

    ensure_not_paused(&mut ctx)?;

    ensure!(!payload.is_empty(), BridgeError::InvalidBridgeInArgs);

    // Any failure to split the payload into its fields is an invalid payload,
    // whatever the codec found wrong with it.
    let decoded = BridgeInPayload::decode(&payload).map_err(|err| match err {
        CodecError::InvalidPayload { .. } => BridgeError::from(err),
        err => BridgeError::from(CodecError::invalid_payload(err.to_string())),
    })?;
    let token = decoded.token_addr().map_err(BridgeError::from)?;
    let recipient = decoded.recipient_addr().map_err(BridgeError::from)?;

    // Attesters sign over the payload exactly as relayed.
    let attesters = ATTESTERS
        .range(ctx.storage(), None)
        .collect::<StdResult<BTreeSet<_>>>()?;
    let threshold = SIGNATURE_THRESHOLD.load(ctx.storage())?;

    omo_quorum::verify(
        &Secp256k1,
        &keccak256(&payload),
        &attestation,
        &attesters,
        threshold,
    )
    .map_err(BridgeError::from)?;

    // Settle with the transmitter. The amount is whatever it actually paid us.
    let transmitter: Addr = ctx.querier().query(
        cfg.token_messenger,
        &TokenMessengerQueryMsg::LocalMessageTransmitter {},
    )?;

    let contract = ctx.contract;
    let balance_before = ctx.token_balance(token, contract)?;

    let res = ctx.call(
        transmitter,
        &MessageTransmitterExecuteMsg::ReceiveMessage {
            message: decoded.attested_sender.clone().into(),
            attestation: decoded.attestation.into(),
        },
        0,
    )?;

    let amount = ctx
        .token_balance(token, contract)?
        .saturating_sub(balance_before);

    ensure!(amount > 0, BridgeError::AmountZero);

    // A transmitter that doesn't say who it minted to is treated as having
    // minted to nobody.
    let mint_recipient = res
        .data_as::<ReceiveMessageResponse>()?
        .map_or(Addr::ZERO, |report| report.mint_recipient);

    ensure!(mint_recipient == contract, BridgeError::RecipientMismatch {
        expect: contract,
        actual: mint_recipient,
    });

    ensure!(!recipient.is_zero(), BridgeError::RecipientZero);

    let forwarded = match cfg.call_proxy {
        Some(call_proxy) if !decoded.calldata.is_empty() => {
            ctx.transfer_token(token, call_proxy, amount)?;
            ctx.call(
                call_proxy,
                &call_proxy::ExecuteMsg::ProxyCall {
                    token,
                    amount,
                    fallback: recipient,
                    calldata: decoded.calldata.into(),
                },
                0,
            )?;

            true
        },
        _ => {
            ctx.transfer_token(token, recipient, amount)?;

            false
        },
    };

    #[cfg(feature = "tracing")]
    tracing::info!(
        recipient = recipient.to_string(),
        token = token.to_string(),
        amount,
        forwarded,
        "Bridged in"
    );

    Ok(Response::new().add_event(BridgeIn {
        sender: ctx.sender,
        attested_sender: decoded.attested_sender.into(),
        recipient,
        token,
        amount,
        forwarded,
    })?)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::contract,
        omo_host::{ContractBuilder, Host, ImmutableCtx, JsonSerExt, ResultExt},
        omo_types::{
            bridge::{BoundBridgesResponse, QueryMsg},
            Empty, SearchEvent,
        },
        test_case::test_case,
    };

    const OWNER: Addr = Addr::mock(1);
    const ATTESTER: Addr = Addr::mock(2);
    const FEE_COLLECTOR: Addr = Addr::mock(3);
    const USER: Addr = Addr::mock(4);
    const DOMAIN: Domain = 7;

    fn messenger_instantiate(_ctx: MutableCtx, _msg: Empty) -> anyhow::Result<Response> {
        Ok(Response::new())
    }

    /// A messenger that owns no burn token.
    fn messenger_query(_ctx: ImmutableCtx, msg: TokenMessengerQueryMsg) -> anyhow::Result<Vec<u8>> {
        match msg {
            TokenMessengerQueryMsg::LocalMessageTransmitter {} => Ok(Addr::ZERO.to_json_vec()?),
            TokenMessengerQueryMsg::IsBurnToken { .. } => Ok(false.to_json_vec()?),
        }
    }

    fn setup() -> (Host, Addr, Addr) {
        let mut host = Host::new();

        let messenger = host
            .instantiate(
                OWNER,
                ContractBuilder::new(messenger_instantiate)
                    .with_query(messenger_query)
                    .build(),
                "messenger",
                &Empty {},
                0,
            )
            .should_succeed();

        let bridge = host
            .instantiate(
                OWNER,
                contract(),
                "bridge",
                &InstantiateMsg {
                    token_messenger: messenger,
                    attester: ATTESTER,
                    fee_collector: FEE_COLLECTOR,
                },
                0,
            )
            .should_succeed();

        let token = host.create_token("USDC", 6);
        host.mint_token(token, USER, 1000).should_succeed();
        host.approve_token(USER, token, bridge, 1000).should_succeed();

        (host, bridge, token)
    }

    fn bridge_out_msg(token: Addr, recipient: Addr32) -> ExecuteMsg {
        ExecuteMsg::BridgeOut {
            token,
            amount: 100,
            destination_domain: DOMAIN,
            recipient,
            refund: Addr32::ZERO,
        }
    }

    #[test_case(Addr::ZERO, ATTESTER, FEE_COLLECTOR, "tokenMessenger address cannot be zero")]
    #[test_case(Addr::mock(9), Addr::ZERO, FEE_COLLECTOR, "New attester must be nonzero")]
    #[test_case(Addr::mock(9), ATTESTER, Addr::ZERO, "feeCollector address cannot be zero")]
    fn instantiating_with_zero_addresses(
        token_messenger: Addr,
        attester: Addr,
        fee_collector: Addr,
        error: &str,
    ) {
        Host::new()
            .instantiate(
                OWNER,
                contract(),
                "bridge",
                &InstantiateMsg {
                    token_messenger,
                    attester,
                    fee_collector,
                },
                0,
            )
            .should_fail_with_error(error);
    }

    #[test]
    fn instantiating() {
        let (host, bridge, _) = setup();

        host.query::<_, Vec<Addr>>(bridge, &QueryMsg::Attesters {
            start_after: None,
            limit: None,
        })
        .should_succeed_and_equal(vec![ATTESTER]);
        host.query::<_, u32>(bridge, &QueryMsg::SignatureThreshold {})
            .should_succeed_and_equal(1);
        host.query::<_, bool>(bridge, &QueryMsg::Paused {})
            .should_succeed_and_equal(false);
        host.query::<_, u64>(bridge, &QueryMsg::NextSequence {})
            .should_succeed_and_equal(0);
    }

    #[test_case(ExecuteMsg::Pause {}; "pause")]
    #[test_case(ExecuteMsg::BindBridge { domain: 1, bridge: Addr32::ZERO }; "bind")]
    #[test_case(ExecuteMsg::UnbindBridge { domain: 1 }; "unbind")]
    #[test_case(ExecuteMsg::DisableBridgeToken { token: Addr::mock(9) }; "disable token")]
    #[test_case(ExecuteMsg::DisableRoute { token: Addr::mock(9), domain: 1 }; "disable route")]
    #[test_case(ExecuteMsg::EnableAttester { attester: Addr::mock(9) }; "enable attester")]
    #[test_case(ExecuteMsg::SetSignatureThreshold { threshold: 2 }; "set threshold")]
    #[test_case(ExecuteMsg::SetCallProxy { call_proxy: Addr::mock(9) }; "set call proxy")]
    #[test_case(ExecuteMsg::TransferOwnership { new_owner: USER }; "transfer ownership")]
    #[test_case(ExecuteMsg::RescueFund { token: Addr::mock(9) }; "rescue")]
    fn admin_operations_require_owner(msg: ExecuteMsg) {
        let (mut host, bridge, _) = setup();

        host.execute(USER, bridge, &msg, 0)
            .should_fail_with_error("Ownable: caller is not the owner");
    }

    #[test]
    fn binding_bridges() {
        let (mut host, bridge, _) = setup();
        let remote = Addr32::from(Addr::mock(8));

        host.execute(
            OWNER,
            bridge,
            &ExecuteMsg::BindBridgeBatch {
                domains: vec![1, 2],
                bridges: vec![remote],
            },
            0,
        )
        .should_fail_with_error("Inconsistent parameter lengths");

        let res = host
            .execute(
                OWNER,
                bridge,
                &ExecuteMsg::BindBridgeBatch {
                    domains: vec![3, 1, 2],
                    bridges: vec![remote; 3],
                },
                0,
            )
            .should_succeed();
        assert_eq!(res.events.search_event::<BindBridgeBatch>().len(), 1);

        host.execute(OWNER, bridge, &ExecuteMsg::UnbindBridge { domain: 2 }, 0)
            .should_succeed();

        host.query::<_, Option<Addr32>>(bridge, &QueryMsg::BoundBridge { domain: 2 })
            .should_succeed_and_equal(None);
        host.query::<_, BoundBridgesResponse>(bridge, &QueryMsg::BoundBridges {
            start_after: None,
            limit: None,
        })
        .should_succeed_and_equal(BoundBridgesResponse::from([(1, remote), (3, remote)]));
    }

    #[test]
    fn pausing_twice() {
        let (mut host, bridge, _) = setup();

        host.execute(OWNER, bridge, &ExecuteMsg::Unpause {}, 0)
            .should_fail_with_error("Pausable: not paused");
        host.execute(OWNER, bridge, &ExecuteMsg::Pause {}, 0)
            .should_succeed();
        host.execute(OWNER, bridge, &ExecuteMsg::Pause {}, 0)
            .should_fail_with_error("Pausable: paused");
    }

    #[test]
    fn signature_threshold_must_be_positive() {
        let (mut host, bridge, _) = setup();

        host.execute(
            OWNER,
            bridge,
            &ExecuteMsg::SetSignatureThreshold { threshold: 0 },
            0,
        )
        .should_fail_with_error("signature threshold must be at least 1");

        // Larger than the attester set is accepted.
        host.execute(
            OWNER,
            bridge,
            &ExecuteMsg::SetSignatureThreshold { threshold: 5 },
            0,
        )
        .should_succeed();
    }

    #[test]
    fn bridge_out_preconditions_in_order() {
        let (mut host, bridge, token) = setup();
        let recipient = Addr32::from(USER);

        // Unbound domain, zero recipient: the route error wins.
        host.execute(USER, bridge, &bridge_out_msg(token, Addr32::ZERO), 0)
            .should_fail_with_error("target bridge not enabled");

        host.execute(
            OWNER,
            bridge,
            &ExecuteMsg::BindBridge {
                domain: DOMAIN,
                bridge: Addr32::from(Addr::mock(8)),
            },
            0,
        )
        .should_succeed();

        host.execute(USER, bridge, &bridge_out_msg(token, Addr32::ZERO), 0)
            .should_fail_with_error("recipient address cannot be zero");

        host.execute(OWNER, bridge, &ExecuteMsg::DisableRoute {
            token,
            domain: DOMAIN,
        }, 0)
        .should_succeed();
        host.execute(OWNER, bridge, &ExecuteMsg::DisableBridgeToken { token }, 0)
            .should_succeed();

        host.execute(USER, bridge, &bridge_out_msg(token, recipient), 0)
            .should_fail_with_error("token not enabled");

        host.execute(OWNER, bridge, &ExecuteMsg::EnableBridgeToken { token }, 0)
            .should_succeed();

        host.execute(USER, bridge, &bridge_out_msg(token, recipient), 0)
            .should_fail_with_error("route disabled");

        host.execute(OWNER, bridge, &ExecuteMsg::SetCallProxy {
            call_proxy: USER,
        }, 0)
        .should_succeed();

        host.execute(USER, bridge, &bridge_out_msg(token, recipient), 0)
            .should_fail_with_error("forbidden");

        host.execute(OWNER, bridge, &ExecuteMsg::Pause {}, 0)
            .should_succeed();

        host.execute(USER, bridge, &bridge_out_msg(token, recipient), 0)
            .should_fail_with_error("Pausable: paused");

        // Nothing moved.
        assert_eq!(host.token_balance(token, USER).unwrap(), 1000);
    }

    #[test]
    fn bridge_out_custodies_and_accrues_fees() {
        let (mut host, bridge, token) = setup();
        host.set_native_balance(USER, 10);

        host.execute(
            OWNER,
            bridge,
            &ExecuteMsg::BindBridge {
                domain: DOMAIN,
                bridge: Addr32::from(Addr::mock(8)),
            },
            0,
        )
        .should_succeed();

        for expected_sequence in 0..2 {
            let res = host
                .execute(USER, bridge, &bridge_out_msg(token, Addr32::from(USER)), 3)
                .should_succeed();

            let events = res.events.search_event::<BridgeOut>();
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].sequence, expected_sequence);
            assert_eq!(events[0].fee_amount, 3);
            assert_eq!(events[0].remote_bridge, Addr32::from(Addr::mock(8)));
            assert_eq!(events[0].burn_nonce, None);
        }

        assert_eq!(host.token_balance(token, bridge).unwrap(), 200);
        assert_eq!(host.native_balance(bridge), 6);
        host.query::<_, u128>(bridge, &QueryMsg::AccruedFees {})
            .should_succeed_and_equal(6);

        // Stray native funds can be rescued, accrued fees can't.
        host.send_native(USER, bridge, 4).should_succeed();
        let res = host
            .execute(OWNER, bridge, &ExecuteMsg::RescueNative { to: OWNER }, 0)
            .should_succeed();
        assert_eq!(res.events.search_event::<NativeRescued>(), vec![NativeRescued {
            to: OWNER,
            amount: 4,
        }]);
        assert_eq!(host.native_balance(OWNER), 4);

        host.execute(USER, bridge, &ExecuteMsg::CollectFees {}, 0)
            .should_fail_with_error("neither the owner nor the fee collector");
        host.execute(FEE_COLLECTOR, bridge, &ExecuteMsg::CollectFees {}, 0)
            .should_succeed();
        assert_eq!(host.native_balance(FEE_COLLECTOR), 6);
        assert_eq!(host.native_balance(bridge), 0);
    }

    #[test]
    fn bridge_in_rejects_malformed_input() {
        let (mut host, bridge, _) = setup();

        host.execute(
            USER,
            bridge,
            &ExecuteMsg::BridgeIn {
                payload: HexBinary::empty(),
                attestation: HexBinary::empty(),
            },
            0,
        )
        .should_fail_with_error("invalid bridgeIn args");

        let payload = BridgeInPayload {
            token: Addr::mock(9).to_vec(),
            attested_sender: vec![0xaa; 65],
            attestation: vec![0xbb; 65],
            recipient: USER.to_vec(),
            calldata: vec![],
        }
        .encode();

        // A short length prefix, a payload cut in half, and trailing bytes.
        for malformed in [
            vec![0x05, 0x01],
            payload[..payload.len() / 2].to_vec(),
            [payload.as_slice(), &[0x00]].concat(),
        ] {
            let err = host
                .execute(
                    USER,
                    bridge,
                    &ExecuteMsg::BridgeIn {
                        payload: malformed.into(),
                        attestation: HexBinary::empty(),
                    },
                    0,
                )
                .should_fail_with_error("invalid payload");

            assert_eq!(
                err.downcast_ref::<BridgeError>().map(BridgeError::reason),
                Some("InvalidPayload")
            );
        }

        let payload = BridgeInPayload {
            token: Addr::mock(9).to_vec(),
            attested_sender: vec![],
            attestation: vec![],
            recipient: USER.to_vec(),
            calldata: vec![],
        };

        host.execute(
            USER,
            bridge,
            &ExecuteMsg::BridgeIn {
                payload: payload.encode().into(),
                attestation: vec![0; 64].into(),
            },
            0,
        )
        .should_fail_with_error("Invalid attestation length");
    }

    #[test]
    fn ownership_transfer() {
        let (mut host, bridge, _) = setup();

        host.execute(OWNER, bridge, &ExecuteMsg::TransferOwnership {
            new_owner: Addr::ZERO,
        }, 0)
        .should_fail_with_error("new owner is the zero address");

        host.execute(OWNER, bridge, &ExecuteMsg::TransferOwnership { new_owner: USER }, 0)
            .should_succeed();

        host.execute(OWNER, bridge, &ExecuteMsg::Pause {}, 0)
            .should_fail_with_error("Ownable: caller is not the owner");
        host.execute(USER, bridge, &ExecuteMsg::Pause {}, 0)
            .should_succeed();
    }
}
