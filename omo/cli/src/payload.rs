use {
    crate::print_json_pretty,
    clap::Subcommand,
    omo_types::{
        bridge::BridgeInPayload, call_proxy::CallInstruction, keccak256, Hash256, HexBinary,
    },
    serde::Serialize,
};

#[derive(Subcommand)]
pub enum PayloadCmd {
    /// Encode a bridge-in payload and print it with its digest
    Encode {
        /// Token address on the destination domain
        #[arg(long)]
        token: HexBinary,
        /// Message handed to the message transmitter
        #[arg(long)]
        attested_sender: HexBinary,
        /// The transmitter's attestation over the message
        #[arg(long)]
        attestation: HexBinary,
        /// Recipient address
        #[arg(long)]
        recipient: HexBinary,
        /// Encoded call instruction [default: empty]
        #[arg(long, default_value = "")]
        calldata: HexBinary,
    },
    /// Decode a bridge-in payload
    Decode {
        /// Payload in hex encoding
        payload: HexBinary,
    },
    /// Print the digest attesters sign for a payload
    Digest {
        /// Payload in hex encoding
        payload: HexBinary,
    },
}

/// A decoded payload, for display.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PayloadView {
    pub token: HexBinary,
    pub attested_sender: HexBinary,
    pub attestation: HexBinary,
    pub recipient: HexBinary,
    pub calldata: HexBinary,
    /// Set if the calldata is a well-formed call instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<CallInstruction>,
    pub digest: Hash256,
}

#[derive(Serialize)]
struct EncodedPayload {
    payload: HexBinary,
    digest: Hash256,
}

impl PayloadCmd {
    pub fn run(self) -> anyhow::Result<()> {
        match self {
            PayloadCmd::Encode {
                token,
                attested_sender,
                attestation,
                recipient,
                calldata,
            } => {
                let payload = BridgeInPayload {
                    token: token.into(),
                    attested_sender: attested_sender.into(),
                    attestation: attestation.into(),
                    recipient: recipient.into(),
                    calldata: calldata.into(),
                }
                .encode();

                tracing::debug!(len = payload.len(), "Encoded payload");

                print_json_pretty(EncodedPayload {
                    digest: keccak256(&payload),
                    payload: payload.into(),
                })
            },
            PayloadCmd::Decode { payload } => print_json_pretty(decode_payload(&payload)?),
            PayloadCmd::Digest { payload } => {
                println!("{}", keccak256(&payload));
                Ok(())
            },
        }
    }
}

pub fn decode_payload(buf: &[u8]) -> anyhow::Result<PayloadView> {
    let payload = BridgeInPayload::decode(buf)?;

    let call = if payload.calldata.is_empty() {
        None
    } else {
        CallInstruction::decode(&payload.calldata)
            .inspect_err(|err| tracing::warn!(err = err.to_string(), "Malformed calldata"))
            .ok()
    };

    Ok(PayloadView {
        token: payload.token.into(),
        attested_sender: payload.attested_sender.into(),
        attestation: payload.attestation.into(),
        recipient: payload.recipient.into(),
        calldata: payload.calldata.into(),
        call,
        digest: keccak256(buf),
    })
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, omo_types::Addr};

    fn sample(calldata: Vec<u8>) -> Vec<u8> {
        BridgeInPayload {
            token: Addr::mock(1).to_vec(),
            attested_sender: b"message".to_vec(),
            attestation: vec![0xab; 65],
            recipient: Addr::mock(2).to_vec(),
            calldata,
        }
        .encode()
    }

    #[test]
    fn decoding_with_call_instruction() {
        let call = CallInstruction {
            target: Addr::mock(3),
            msg: b"{}".to_vec().into(),
        };
        let buf = sample(call.encode());

        let view = decode_payload(&buf).unwrap();
        assert_eq!(view.token.as_ref(), Addr::mock(1).as_ref());
        assert_eq!(view.call, Some(call));
        assert_eq!(view.digest, keccak256(&buf));
    }

    #[test]
    fn decoding_with_malformed_calldata() {
        let view = decode_payload(&sample(b"junk".to_vec())).unwrap();
        assert_eq!(view.calldata.as_ref(), b"junk");
        assert_eq!(view.call, None);
    }

    #[test]
    fn decoding_truncated_payload() {
        let buf = sample(vec![]);
        assert!(decode_payload(&buf[..buf.len() - 1]).is_err());
    }
}
