use {
    crate::{event, write_var_bytes, Addr, CodecResult, HexBinary, VarBytesReader},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

// -------------------------------- instruction --------------------------------

/// The instruction carried in a payload's calldata field: call `target` with
/// `msg`. Encoded as two length-prefixed fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CallInstruction {
    pub target: Addr,
    pub msg: HexBinary,
}

impl CallInstruction {
    pub fn encode(&self) -> Vec<u8> {
        encode_call_data(self.target, &self.msg)
    }

    pub fn decode(buf: &[u8]) -> CodecResult<Self> {
        let (target, msg) = decode_call_data(buf)?;
        Ok(Self {
            target,
            msg: msg.into(),
        })
    }
}

/// Encode a call instruction for use as a payload's calldata.
pub fn encode_call_data(target: Addr, msg: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(Addr::LENGTH + msg.len() + 10);
    write_var_bytes(&mut buf, &target);
    write_var_bytes(&mut buf, msg);
    buf
}

/// Decode a call instruction. The target must be exactly 20 bytes, and the
/// buffer must contain nothing else.
pub fn decode_call_data(buf: &[u8]) -> CodecResult<(Addr, &[u8])> {
    let mut reader = VarBytesReader::new(buf);
    let target = Addr::from_slice(reader.next_field()?)?;
    let msg = reader.next_field()?;
    reader.finish()?;

    Ok((target, msg))
}

/// How a forwarded call ended. Every branch ends with the remainder being
/// sent to the fallback recipient.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    /// The target consumed the whole amount.
    Delivered,
    /// The target consumed part of the amount.
    PartiallyConsumed { remainder: u128 },
    /// The instruction was malformed, the target isn't a contract, or the call
    /// failed. Nothing was consumed.
    Rejected { reason: String },
}

impl CallOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

// ---------------------------------- config -----------------------------------

#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub owner: Addr,
    /// The only account allowed to invoke `proxy_call`.
    pub bridge: Option<Addr>,
}

// --------------------------------- messages ----------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InstantiateMsg {
    pub bridge: Option<Addr>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    SetBridge {
        bridge: Addr,
    },
    TransferOwnership {
        new_owner: Addr,
    },
    /// Send the proxy's entire balance of a token to the owner.
    RescueFund {
        token: Addr,
    },
    /// Forward `amount` of `token`, already transferred to the proxy, as
    /// instructed by `calldata`.
    ProxyCall {
        token: Addr,
        amount: u128,
        fallback: Addr,
        calldata: HexBinary,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns `Config`.
    Config {},
    /// Returns `HexBinary`.
    EncodeCallData { target: Addr, msg: HexBinary },
    /// Returns `CallInstruction`.
    DecodeCallData { calldata: HexBinary },
}

// ---------------------------------- events -----------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetBridge {
    pub bridge: Addr,
}

event!(SetBridge, "set_bridge");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProxyCall {
    pub token: Addr,
    pub amount: u128,
    pub fallback: Addr,
    pub target: Option<Addr>,
    pub consumed: u128,
    pub refunded: u128,
    pub outcome: CallOutcome,
}

event!(ProxyCall, "proxy_call");

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, crate::CodecError, test_case::test_case};

    #[test]
    fn call_data_roundtrip() {
        let calldata = encode_call_data(Addr::mock(9), &[0u8; 20]);
        assert_eq!(calldata.len(), 21 + 21);

        let (target, msg) = decode_call_data(&calldata).unwrap();
        assert_eq!(target, Addr::mock(9));
        assert_eq!(msg, &[0u8; 20]);
    }

    #[test_case(&[0x01, 0xaa, 0x00]; "short target")]
    #[test_case(&[]; "empty")]
    #[test_case(&[0x14]; "truncated target")]
    fn malformed_call_data(buf: &[u8]) {
        assert!(decode_call_data(buf).is_err());
    }

    #[test]
    fn short_target_reports_address_length() {
        let mut buf = Vec::new();
        write_var_bytes(&mut buf, &[1, 2, 3]);
        write_var_bytes(&mut buf, b"");

        assert_eq!(
            CallInstruction::decode(&buf).unwrap_err(),
            CodecError::AddressLength { actual: 3 }
        );
    }
}
