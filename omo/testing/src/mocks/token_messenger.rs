//! A token messenger for one canonical asset. Burning is modelled as the
//! messenger taking custody.

use {
    anyhow::ensure,
    borsh::{BorshDeserialize, BorshSerialize},
    omo_host::{
        Contract, ContractBuilder, Counter, ImmutableCtx, Item, JsonSerExt, MutableCtx, Response,
    },
    omo_types::{
        bridge::Domain,
        event,
        messenger::{TokenMessengerExecuteMsg, TokenMessengerQueryMsg},
        Addr, Addr32,
    },
    serde::{Deserialize, Serialize},
    std::sync::Arc,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InstantiateMsg {
    pub message_transmitter: Addr,
    pub burn_token: Addr,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DepositForBurn {
    pub nonce: u64,
    pub depositor: Addr,
    pub burn_token: Addr,
    pub amount: u128,
    pub destination_domain: Domain,
    pub mint_recipient: Addr32,
    pub destination_caller: Addr32,
}

event!(DepositForBurn, "deposit_for_burn");

#[derive(BorshSerialize, BorshDeserialize)]
struct Config {
    message_transmitter: Addr,
    burn_token: Addr,
}

const CONFIG: Item<Config> = Item::new("config");

// The first message gets nonce 1.
const NONCE: Counter = Counter::new("nonce", 1);

pub fn contract() -> Arc<dyn Contract> {
    ContractBuilder::new(instantiate)
        .with_execute(execute)
        .with_query(query)
        .build()
}

fn instantiate(mut ctx: MutableCtx, msg: InstantiateMsg) -> anyhow::Result<Response> {
    CONFIG.save(ctx.storage(), &Config {
        message_transmitter: msg.message_transmitter,
        burn_token: msg.burn_token,
    })?;

    Ok(Response::new())
}

fn execute(mut ctx: MutableCtx, msg: TokenMessengerExecuteMsg) -> anyhow::Result<Response> {
    match msg {
        TokenMessengerExecuteMsg::DepositForBurnWithCaller {
            amount,
            destination_domain,
            mint_recipient,
            burn_token,
            destination_caller,
        } => {
            let cfg = CONFIG.load(ctx.storage())?;

            ensure!(burn_token == cfg.burn_token, "Burn token not supported");
            ensure!(!mint_recipient.is_zero(), "Mint recipient must be nonzero");
            ensure!(!destination_caller.is_zero(), "Invalid destination caller");

            let (depositor, contract) = (ctx.sender, ctx.contract);
            ctx.transfer_token_from(burn_token, depositor, contract, amount)?;

            let (nonce, _) = NONCE.increment(ctx.storage())?;

            Ok(Response::new()
                .add_event(DepositForBurn {
                    nonce,
                    depositor,
                    burn_token,
                    amount,
                    destination_domain,
                    mint_recipient,
                    destination_caller,
                })?
                .set_data(&nonce)?)
        },
    }
}

fn query(ctx: ImmutableCtx, msg: TokenMessengerQueryMsg) -> anyhow::Result<Vec<u8>> {
    let cfg = CONFIG.load(ctx.storage())?;

    match msg {
        TokenMessengerQueryMsg::LocalMessageTransmitter {} => {
            Ok(cfg.message_transmitter.to_json_vec()?)
        },
        TokenMessengerQueryMsg::IsBurnToken { token } => {
            Ok((token == cfg.burn_token).to_json_vec()?)
        },
    }
}
