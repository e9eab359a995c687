//! Interface of the canonical-asset collaborators: the token messenger, which
//! burns tokens on the source domain, and the message transmitter, which
//! mints them on the destination domain.

use {
    crate::{bridge::Domain, Addr, Addr32, HexBinary},
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenMessengerExecuteMsg {
    /// Burn `amount` of `burn_token`, pulled from the caller, and emit a
    /// message that only `destination_caller` may receive on the destination
    /// domain. Returns the message nonce as `u64`.
    DepositForBurnWithCaller {
        amount: u128,
        destination_domain: Domain,
        mint_recipient: Addr32,
        burn_token: Addr,
        destination_caller: Addr32,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenMessengerQueryMsg {
    /// Returns `Addr`.
    LocalMessageTransmitter {},
    /// Returns `bool`.
    IsBurnToken { token: Addr },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageTransmitterExecuteMsg {
    /// Verify `attestation` over `message` and mint accordingly. Returns
    /// `ReceiveMessageResponse`.
    ReceiveMessage {
        message: HexBinary,
        attestation: HexBinary,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReceiveMessageResponse {
    pub mint_recipient: Addr,
    pub amount: u128,
}
