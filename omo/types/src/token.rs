//! Events emitted by the host's fungible token ledgers.

use {
    crate::{event, Addr},
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub token: Addr,
    pub from: Addr,
    pub to: Addr,
    pub amount: u128,
}

event!(Transfer, "transfer");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    pub token: Addr,
    pub owner: Addr,
    pub spender: Addr,
    pub amount: u128,
}

event!(Approval, "approval");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NativeTransfer {
    pub from: Addr,
    pub to: Addr,
    pub amount: u128,
}

event!(NativeTransfer, "native_transfer");
