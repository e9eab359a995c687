use {
    crate::GenesisConfig,
    omo_host::Host,
    omo_types::{bridge, call_proxy, Addr},
};

/// Addresses of the contracts deployed by [`build_genesis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisContracts {
    pub bridge: Addr,
    pub call_proxy: Option<Addr>,
}

/// Deploy and configure the bridge, and optionally the call proxy, on a host.
///
/// Every step is its own transaction sent by the configured owner. The
/// contracts validate their own inputs; an invalid config surfaces as the
/// error of the first step that rejects it.
pub fn build_genesis(host: &mut Host, cfg: &GenesisConfig) -> anyhow::Result<GenesisContracts> {
    let owner = cfg.bridge.owner;

    // A missing attester is rejected by the bridge as a zero attester.
    let (first_attester, other_attesters) = match cfg.bridge.attesters.split_first() {
        Some((first, others)) => (*first, others),
        None => (Addr::ZERO, &[][..]),
    };

    let bridge = host.instantiate(
        owner,
        omo_bridge::contract(),
        "bridge",
        &bridge::InstantiateMsg {
            token_messenger: cfg.bridge.token_messenger,
            attester: first_attester,
            fee_collector: cfg.bridge.fee_collector,
        },
        0,
    )?;

    let mut msgs = Vec::new();

    for attester in other_attesters {
        msgs.push(bridge::ExecuteMsg::EnableAttester {
            attester: *attester,
        });
    }

    if cfg.bridge.signature_threshold != 1 {
        msgs.push(bridge::ExecuteMsg::SetSignatureThreshold {
            threshold: cfg.bridge.signature_threshold,
        });
    }

    if !cfg.bridge.routes.is_empty() {
        let (domains, bridges) = cfg
            .bridge
            .routes
            .iter()
            .map(|route| (route.domain, route.bridge))
            .unzip();

        msgs.push(bridge::ExecuteMsg::BindBridgeBatch { domains, bridges });
    }

    for token in &cfg.bridge.disabled_tokens {
        msgs.push(bridge::ExecuteMsg::DisableBridgeToken { token: *token });
    }

    for route in &cfg.bridge.disabled_routes {
        msgs.push(bridge::ExecuteMsg::DisableRoute {
            token: route.token,
            domain: route.domain,
        });
    }

    for msg in msgs {
        host.execute(owner, bridge, &msg, 0)?;
    }

    let call_proxy = if cfg.call_proxy.deploy {
        let call_proxy = host.instantiate(
            owner,
            omo_call_proxy::contract(),
            "call_proxy",
            &call_proxy::InstantiateMsg {
                bridge: Some(bridge),
            },
            0,
        )?;

        host.execute(
            owner,
            bridge,
            &bridge::ExecuteMsg::SetCallProxy { call_proxy },
            0,
        )?;

        Some(call_proxy)
    } else {
        None
    };

    Ok(GenesisContracts { bridge, call_proxy })
}

// ----------------------------------- tests -----------------------------------
