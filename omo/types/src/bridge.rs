use {
    crate::{
        event, write_var_bytes, Addr, Addr32, CodecError, CodecResult, HexBinary, VarBytesReader,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

/// Identifies an execution domain.
pub type Domain = u32;

// ---------------------------------- payload ----------------------------------

/// The inbound payload relayed to `bridge_in`: five length-prefixed fields,
/// in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeInPayload {
    /// The token being credited, as a 20-byte address.
    pub token: Vec<u8>,
    /// The message handed to the transmitter. Binds the payload to a deposit
    /// on the source domain.
    pub attested_sender: Vec<u8>,
    /// The transmitter's attestation over `attested_sender`.
    pub attestation: Vec<u8>,
    /// The recipient, as a 20-byte address.
    pub recipient: Vec<u8>,
    /// Encoded call instruction for the call proxy. May be empty.
    pub calldata: Vec<u8>,
}

impl BridgeInPayload {
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            self.token.len()
                + self.attested_sender.len()
                + self.attestation.len()
                + self.recipient.len()
                + self.calldata.len()
                + 5,
        );
        write_var_bytes(&mut buf, &self.token);
        write_var_bytes(&mut buf, &self.attested_sender);
        write_var_bytes(&mut buf, &self.attestation);
        write_var_bytes(&mut buf, &self.recipient);
        write_var_bytes(&mut buf, &self.calldata);
        buf
    }

    pub fn decode(buf: &[u8]) -> CodecResult<Self> {
        if buf.is_empty() {
            return Err(CodecError::invalid_payload("empty payload"));
        }

        let mut reader = VarBytesReader::new(buf);
        let payload = Self {
            token: reader.next_field()?.to_vec(),
            attested_sender: reader.next_field()?.to_vec(),
            attestation: reader.next_field()?.to_vec(),
            recipient: reader.next_field()?.to_vec(),
            calldata: reader.next_field()?.to_vec(),
        };
        reader.finish()?;

        Ok(payload)
    }

    pub fn token_addr(&self) -> CodecResult<Addr> {
        Addr::from_slice(&self.token)
    }

    pub fn recipient_addr(&self) -> CodecResult<Addr> {
        Addr::from_slice(&self.recipient)
    }
}

// ---------------------------------- config -----------------------------------

#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub owner: Addr,
    pub token_messenger: Addr,
    pub fee_collector: Addr,
    pub call_proxy: Option<Addr>,
}

// --------------------------------- messages ----------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InstantiateMsg {
    pub token_messenger: Addr,
    pub attester: Addr,
    pub fee_collector: Addr,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Bind the remote bridge of a domain.
    BindBridge { domain: Domain, bridge: Addr32 },
    /// Bind the remote bridges of several domains at once.
    BindBridgeBatch {
        domains: Vec<Domain>,
        bridges: Vec<Addr32>,
    },
    UnbindBridge { domain: Domain },
    UnbindBridgeBatch { domains: Vec<Domain> },
    EnableBridgeToken { token: Addr },
    DisableBridgeToken { token: Addr },
    EnableRoute { token: Addr, domain: Domain },
    DisableRoute { token: Addr, domain: Domain },
    EnableAttester { attester: Addr },
    DisableAttester { attester: Addr },
    SetSignatureThreshold { threshold: u32 },
    SetFeeCollector { fee_collector: Addr },
    SetCallProxy { call_proxy: Addr },
    SetTokenMessenger { token_messenger: Addr },
    Pause {},
    Unpause {},
    TransferOwnership { new_owner: Addr },
    /// Send the bridge's entire balance of a token to the owner.
    RescueFund { token: Addr },
    /// Send native balance in excess of the accrued fees.
    RescueNative { to: Addr },
    /// Send the accrued fees to the fee collector.
    CollectFees {},
    /// Execute an arbitrary message on a collaborator contract.
    ExternalCall { target: Addr, msg: HexBinary },
    /// Send tokens to another domain. Attached native funds are the fee.
    BridgeOut {
        token: Addr,
        amount: u128,
        destination_domain: Domain,
        recipient: Addr32,
        refund: Addr32,
    },
    /// Deliver an attested payload.
    BridgeIn {
        payload: HexBinary,
        attestation: HexBinary,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns `Config`.
    Config {},
    /// Returns `bool`.
    Paused {},
    /// Returns `Option<Addr32>`.
    BoundBridge { domain: Domain },
    /// Returns `BTreeMap<Domain, Addr32>`.
    BoundBridges {
        start_after: Option<Domain>,
        limit: Option<u32>,
    },
    /// Returns `bool`.
    TokenDisabled { token: Addr },
    /// Returns `bool`.
    RouteDisabled { token: Addr, domain: Domain },
    /// Returns `Vec<Addr>`.
    Attesters {
        start_after: Option<Addr>,
        limit: Option<u32>,
    },
    /// Returns `u32`.
    SignatureThreshold {},
    /// Returns `u64`.
    NextSequence {},
    /// Returns `u128`.
    AccruedFees {},
    /// Returns `Addr`, resolved through the token messenger.
    MessageTransmitter {},
}

pub type BoundBridgesResponse = BTreeMap<Domain, Addr32>;

// ---------------------------------- events -----------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BindBridge {
    pub domain: Domain,
    pub bridge: Addr32,
}

event!(BindBridge, "bind_bridge");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BindBridgeBatch {
    pub domains: Vec<Domain>,
    pub bridges: Vec<Addr32>,
}

event!(BindBridgeBatch, "bind_bridge_batch");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UnbindBridge {
    pub domain: Domain,
}

event!(UnbindBridge, "unbind_bridge");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UnbindBridgeBatch {
    pub domains: Vec<Domain>,
}

event!(UnbindBridgeBatch, "unbind_bridge_batch");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnableBridgeToken {
    pub token: Addr,
}

event!(EnableBridgeToken, "enable_bridge_token");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DisableBridgeToken {
    pub token: Addr,
}

event!(DisableBridgeToken, "disable_bridge_token");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnableRoute {
    pub token: Addr,
    pub domain: Domain,
}

event!(EnableRoute, "enable_route");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DisableRoute {
    pub token: Addr,
    pub domain: Domain,
}

event!(DisableRoute, "disable_route");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnableAttester {
    pub attester: Addr,
}

event!(EnableAttester, "enable_attester");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DisableAttester {
    pub attester: Addr,
}

event!(DisableAttester, "disable_attester");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetSignatureThreshold {
    pub threshold: u32,
}

event!(SetSignatureThreshold, "set_signature_threshold");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetFeeCollector {
    pub fee_collector: Addr,
}

event!(SetFeeCollector, "set_fee_collector");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetCallProxy {
    pub call_proxy: Addr,
}

event!(SetCallProxy, "set_call_proxy");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetTokenMessenger {
    pub token_messenger: Addr,
}

event!(SetTokenMessenger, "set_token_messenger");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Paused {
    pub account: Addr,
}

event!(Paused, "paused");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Unpaused {
    pub account: Addr,
}

event!(Unpaused, "unpaused");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OwnershipTransferred {
    pub previous_owner: Addr,
    pub new_owner: Addr,
}

event!(OwnershipTransferred, "ownership_transferred");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FeesCollected {
    pub fee_collector: Addr,
    pub amount: u128,
}

event!(FeesCollected, "fees_collected");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FundRescued {
    pub token: Addr,
    pub to: Addr,
    pub amount: u128,
}

event!(FundRescued, "fund_rescued");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NativeRescued {
    pub to: Addr,
    pub amount: u128,
}

event!(NativeRescued, "native_rescued");

/// The departure record. Attesters sign over what it describes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BridgeOut {
    pub sender: Addr,
    pub token: Addr,
    pub amount: u128,
    pub destination_domain: Domain,
    pub sequence: u64,
    pub fee_amount: u128,
    pub recipient: Addr32,
    pub refund: Addr32,
    pub native_value: u128,
    pub remote_bridge: Addr32,
    /// Nonce assigned by the token messenger, if the token took the
    /// burn-and-mint path.
    pub burn_nonce: Option<u64>,
}

event!(BridgeOut, "bridge_out");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BridgeIn {
    /// The relayer who submitted the payload.
    pub sender: Addr,
    pub attested_sender: HexBinary,
    pub recipient: Addr,
    pub token: Addr,
    pub amount: u128,
    /// Whether the amount went through the call proxy.
    pub forwarded: bool,
}

event!(BridgeIn, "bridge_in");

// ----------------------------------- tests -----------------------------------
