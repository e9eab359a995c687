use {
    crate::{CallProxyError, CONFIG},
    anyhow::ensure,
    omo_host::{MutableCtx, Response},
    omo_types::{
        bridge::OwnershipTransferred,
        call_proxy::{
            decode_call_data, CallOutcome, Config, ExecuteMsg, InstantiateMsg, ProxyCall,
            SetBridge,
        },
        Addr, HexBinary,
    },
};

pub fn instantiate(mut ctx: MutableCtx, msg: InstantiateMsg) -> anyhow::Result<Response> {
    ensure!(msg.bridge != Some(Addr::ZERO), CallProxyError::BridgeZero);

    let owner = ctx.sender;

    CONFIG.save(ctx.storage(), &Config {
        owner,
        bridge: msg.bridge,
    })?;

    Ok(Response::new().add_event(OwnershipTransferred {
        previous_owner: Addr::ZERO,
        new_owner: owner,
    })?)
}

pub fn execute(ctx: MutableCtx, msg: ExecuteMsg) -> anyhow::Result<Response> {
    match msg {
        ExecuteMsg::SetBridge { bridge } => set_bridge(ctx, bridge),
        ExecuteMsg::TransferOwnership { new_owner } => transfer_ownership(ctx, new_owner),
        ExecuteMsg::RescueFund { token } => rescue_fund(ctx, token),
        ExecuteMsg::ProxyCall {
            token,
            amount,
            fallback,
            calldata,
        } => proxy_call(ctx, token, amount, fallback, calldata),
    }
}

fn load_config_as_owner(ctx: &mut MutableCtx) -> anyhow::Result<Config> {
    let cfg = CONFIG.load(ctx.storage())?;

    ensure!(ctx.sender == cfg.owner, CallProxyError::NotOwner {
        sender: ctx.sender
    });

    Ok(cfg)
}

#[inline]
fn set_bridge(mut ctx: MutableCtx, bridge: Addr) -> anyhow::Result<Response> {
    let mut cfg = load_config_as_owner(&mut ctx)?;

    ensure!(!bridge.is_zero(), CallProxyError::BridgeZero);

    cfg.bridge = Some(bridge);
    CONFIG.save(ctx.storage(), &cfg)?;

    Ok(Response::new().add_event(SetBridge { bridge })?)
}

#[inline]
fn transfer_ownership(mut ctx: MutableCtx, new_owner: Addr) -> anyhow::Result<Response> {
    let mut cfg = load_config_as_owner(&mut ctx)?;

    ensure!(!new_owner.is_zero(), CallProxyError::OwnerZero);

    let previous_owner = cfg.owner;
    cfg.owner = new_owner;
    CONFIG.save(ctx.storage(), &cfg)?;

    Ok(Response::new().add_event(OwnershipTransferred {
        previous_owner,
        new_owner,
    })?)
}

#[inline]
fn rescue_fund(mut ctx: MutableCtx, token: Addr) -> anyhow::Result<Response> {
    let cfg = load_config_as_owner(&mut ctx)?;

    let balance = ctx.token_balance(token, ctx.contract)?;
    ctx.transfer_token(token, cfg.owner, balance)?;

    Ok(Response::new())
}

/// Attempt the instructed call with `amount` of `token`, which the bridge has
/// already transferred here. Whatever the call doesn't consume goes to
/// `fallback`. A bad instruction or a failing call is absorbed, never
/// propagated: the value was legitimately bridged and must reach someone.
#[inline]
fn proxy_call(
    mut ctx: MutableCtx,
    token: Addr,
    amount: u128,
    fallback: Addr,
    calldata: HexBinary,
) -> anyhow::Result<Response> {
    let cfg = CONFIG.load(ctx.storage())?;

    ensure!(cfg.bridge == Some(ctx.sender), CallProxyError::NoPrivilege {
        sender: ctx.sender
    });

    let contract = ctx.contract;

    let (target, outcome) = match decode_call_data(&calldata) {
        Err(err) => (None, CallOutcome::Rejected {
            reason: err.to_string(),
        }),
        Ok((target, _)) if !ctx.is_contract(target) => (Some(target), CallOutcome::Rejected {
            reason: format!("target is not a contract: {target}"),
        }),
        Ok((target, msg)) => {
            let balance_before = ctx.token_balance(token, contract)?;

            ctx.approve_token(token, target, amount)?;

            let outcome = match ctx.try_call_raw(target, msg, 0) {
                Ok(_) => {
                    let balance_after = ctx.token_balance(token, contract)?;
                    let consumed = balance_before.saturating_sub(balance_after);

                    match amount.checked_sub(consumed) {
                        Some(0) | None => CallOutcome::Delivered,
                        Some(remainder) => CallOutcome::PartiallyConsumed { remainder },
                    }
                },
                Err(err) => CallOutcome::Rejected {
                    reason: err.to_string(),
                },
            };

            // Leave no standing allowance behind.
            ctx.approve_token(token, target, 0)?;

            (Some(target), outcome)
        },
    };

    #[cfg(feature = "tracing")]
    if let CallOutcome::Rejected { reason } = &outcome {
        tracing::debug!(reason = reason.as_str(), "Forwarded call rejected, refunding");
    }

    let remainder = match &outcome {
        CallOutcome::Delivered => 0,
        CallOutcome::PartiallyConsumed { remainder } => *remainder,
        CallOutcome::Rejected { .. } => amount,
    };

    // Stray balances that predate this call stay here for `rescue_fund`.
    let refunded = remainder.min(ctx.token_balance(token, contract)?);

    if refunded > 0 {
        ctx.transfer_token(token, fallback, refunded)?;
    }

    #[cfg(feature = "tracing")]
    tracing::info!(
        token = token.to_string(),
        amount,
        refunded,
        fallback = fallback.to_string(),
        "Forwarded call"
    );

    Ok(Response::new()
        .add_event(ProxyCall {
            token,
            amount,
            fallback,
            target,
            consumed: amount - remainder,
            refunded,
            outcome: outcome.clone(),
        })?
        .set_data(&outcome)?)
}

// ----------------------------------- tests -----------------------------------
