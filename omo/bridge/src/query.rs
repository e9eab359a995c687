use {
    crate::{
        ACCRUED_FEES, ATTESTERS, BOUND_BRIDGES, CONFIG, DISABLED_ROUTES, DISABLED_TOKENS,
        NEXT_SEQUENCE, PAUSED, SIGNATURE_THRESHOLD,
    },
    omo_host::{ImmutableCtx, JsonSerExt, StdResult},
    omo_types::{
        bridge::{BoundBridgesResponse, Config, Domain, QueryMsg},
        messenger::TokenMessengerQueryMsg,
        Addr, Addr32,
    },
};

const DEFAULT_PAGE_LIMIT: u32 = 30;

pub fn query(ctx: ImmutableCtx, msg: QueryMsg) -> anyhow::Result<Vec<u8>> {
    match msg {
        QueryMsg::Config {} => {
            let res = query_config(ctx)?;
            Ok(res.to_json_vec()?)
        },
        QueryMsg::Paused {} => {
            let res = PAUSED.load(ctx.storage())?;
            Ok(res.to_json_vec()?)
        },
        QueryMsg::BoundBridge { domain } => {
            let res = query_bound_bridge(ctx, domain)?;
            Ok(res.to_json_vec()?)
        },
        QueryMsg::BoundBridges { start_after, limit } => {
            let res = query_bound_bridges(ctx, start_after, limit)?;
            Ok(res.to_json_vec()?)
        },
        QueryMsg::TokenDisabled { token } => {
            let res = DISABLED_TOKENS.has(ctx.storage(), token);
            Ok(res.to_json_vec()?)
        },
        QueryMsg::RouteDisabled { token, domain } => {
            let res = DISABLED_ROUTES.has(ctx.storage(), (token, domain));
            Ok(res.to_json_vec()?)
        },
        QueryMsg::Attesters { start_after, limit } => {
            let res = query_attesters(ctx, start_after, limit)?;
            Ok(res.to_json_vec()?)
        },
        QueryMsg::SignatureThreshold {} => {
            let res = SIGNATURE_THRESHOLD.load(ctx.storage())?;
            Ok(res.to_json_vec()?)
        },
        QueryMsg::NextSequence {} => {
            let res = NEXT_SEQUENCE.current(ctx.storage())?;
            Ok(res.to_json_vec()?)
        },
        QueryMsg::AccruedFees {} => {
            let res = ACCRUED_FEES.load(ctx.storage())?;
            Ok(res.to_json_vec()?)
        },
        QueryMsg::MessageTransmitter {} => {
            let res = query_message_transmitter(ctx)?;
            Ok(res.to_json_vec()?)
        },
    }
}

#[inline]
fn query_config(ctx: ImmutableCtx) -> StdResult<Config> {
    CONFIG.load(ctx.storage())
}

#[inline]
fn query_bound_bridge(ctx: ImmutableCtx, domain: Domain) -> StdResult<Option<Addr32>> {
    BOUND_BRIDGES.may_load(ctx.storage(), domain)
}

#[inline]
fn query_bound_bridges(
    ctx: ImmutableCtx,
    start_after: Option<Domain>,
    limit: Option<u32>,
) -> StdResult<BoundBridgesResponse> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);

    BOUND_BRIDGES
        .range(ctx.storage(), start_after)
        .take(limit as usize)
        .collect()
}

#[inline]
fn query_attesters(
    ctx: ImmutableCtx,
    start_after: Option<Addr>,
    limit: Option<u32>,
) -> StdResult<Vec<Addr>> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);

    ATTESTERS
        .range(ctx.storage(), start_after)
        .take(limit as usize)
        .collect()
}

#[inline]
fn query_message_transmitter(ctx: ImmutableCtx) -> anyhow::Result<Addr> {
    let cfg = CONFIG.load(ctx.storage())?;

    ctx.querier()
        .query(cfg.token_messenger, &TokenMessengerQueryMsg::LocalMessageTransmitter {})
}
