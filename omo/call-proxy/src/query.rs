use {
    crate::CONFIG,
    omo_host::{ImmutableCtx, JsonSerExt},
    omo_types::{
        call_proxy::{encode_call_data, CallInstruction, QueryMsg},
        HexBinary,
    },
};

pub fn query(ctx: ImmutableCtx, msg: QueryMsg) -> anyhow::Result<Vec<u8>> {
    match msg {
        QueryMsg::Config {} => {
            let res = CONFIG.load(ctx.storage())?;
            Ok(res.to_json_vec()?)
        },
        QueryMsg::EncodeCallData { target, msg } => {
            let res = HexBinary::from(encode_call_data(target, &msg));
            Ok(res.to_json_vec()?)
        },
        QueryMsg::DecodeCallData { calldata } => {
            let res = CallInstruction::decode(&calldata)?;
            Ok(res.to_json_vec()?)
        },
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        crate::contract,
        omo_host::{Host, ResultExt},
        omo_types::{
            call_proxy::{CallInstruction, Config, InstantiateMsg, QueryMsg},
            Addr, HexBinary,
        },
    };

    #[test]
    fn call_data_helpers() {
        let mut host = Host::new();
        let proxy = host
            .instantiate(
                Addr::mock(1),
                contract(),
                "proxy",
                &InstantiateMsg { bridge: None },
                0,
            )
            .should_succeed();

        host.query::<_, Config>(proxy, &QueryMsg::Config {})
            .should_succeed_and_equal(Config {
                owner: Addr::mock(1),
                bridge: None,
            });

        let instruction = CallInstruction {
            target: Addr::mock(7),
            msg: HexBinary::from(b"swap".to_vec()),
        };

        let calldata = host
            .query::<_, HexBinary>(proxy, &QueryMsg::EncodeCallData {
                target: instruction.target,
                msg: instruction.msg.clone(),
            })
            .should_succeed_and_equal(HexBinary::from(instruction.encode()));

        host.query::<_, CallInstruction>(proxy, &QueryMsg::DecodeCallData { calldata })
            .should_succeed_and_equal(instruction);

        host.query::<_, CallInstruction>(proxy, &QueryMsg::DecodeCallData {
            calldata: HexBinary::from(vec![0x01]),
        })
        .should_fail();
    }
}
