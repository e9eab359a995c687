use {
    crate::print_json_pretty,
    clap::Subcommand,
    omo_types::{call_proxy::CallInstruction, Addr, HexBinary},
};

#[derive(Subcommand)]
pub enum CallCmd {
    /// Encode a call instruction, for use as a payload's calldata
    Encode {
        /// Contract to call on the destination domain
        target: Addr,
        /// Message to call it with, in hex encoding
        msg: HexBinary,
    },
    /// Encode a call instruction whose message is JSON
    EncodeJson {
        /// Contract to call on the destination domain
        target: Addr,
        /// Message to call it with
        json: String,
    },
    /// Decode a call instruction
    Decode {
        /// Calldata in hex encoding
        calldata: HexBinary,
    },
}

impl CallCmd {
    pub fn run(self) -> anyhow::Result<()> {
        match self {
            CallCmd::Encode { target, msg } => {
                println!("{}", encode(target, msg));
                Ok(())
            },
            CallCmd::EncodeJson { target, json } => {
                // Re-serialize so that the message is compact.
                let msg = serde_json::to_vec(&serde_json::from_str::<serde_json::Value>(&json)?)?;
                println!("{}", encode(target, msg.into()));
                Ok(())
            },
            CallCmd::Decode { calldata } => {
                print_json_pretty(CallInstruction::decode(&calldata)?)
            },
        }
    }
}

fn encode(target: Addr, msg: HexBinary) -> HexBinary {
    CallInstruction { target, msg }.encode().into()
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex};

    #[test]
    fn encoding_call_instruction() {
        let calldata = encode(Addr::mock(0xaa), b"{}".to_vec().into());

        assert_eq!(
            calldata.as_ref(),
            hex!("14" "00000000000000000000000000000000000000aa" "02" "7b7d")
        );
    }
}
