//! A swap pool with a fixed 1:2 exchange rate.

use {
    omo_host::{Contract, ContractBuilder, MutableCtx, Response},
    omo_types::{event, Addr, Empty},
    serde::{Deserialize, Serialize},
    std::sync::Arc,
};

pub const RATE: u128 = 2;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Pull `amount_in` of `token_in` from the sender, pay `RATE` times as
    /// much `token_out` to `to`.
    Swap {
        token_in: Addr,
        token_out: Addr,
        amount_in: u128,
        to: Addr,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Swapped {
    pub sender: Addr,
    pub token_in: Addr,
    pub token_out: Addr,
    pub amount_in: u128,
    pub amount_out: u128,
    pub to: Addr,
}

event!(Swapped, "swapped");

pub fn contract() -> Arc<dyn Contract> {
    ContractBuilder::new(instantiate)
        .with_execute(execute)
        .build()
}

fn instantiate(_ctx: MutableCtx, _msg: Empty) -> anyhow::Result<Response> {
    Ok(Response::new())
}

fn execute(mut ctx: MutableCtx, msg: ExecuteMsg) -> anyhow::Result<Response> {
    match msg {
        ExecuteMsg::Swap {
            token_in,
            token_out,
            amount_in,
            to,
        } => {
            let (sender, contract) = (ctx.sender, ctx.contract);
            let amount_out = amount_in * RATE;

            ctx.transfer_token_from(token_in, sender, contract, amount_in)?;
            ctx.transfer_token(token_out, to, amount_out)?;

            Ok(Response::new().add_event(Swapped {
                sender,
                token_in,
                token_out,
                amount_in,
                amount_out,
                to,
            })?)
        },
    }
}
