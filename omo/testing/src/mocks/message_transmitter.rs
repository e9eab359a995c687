//! A message transmitter whose messages are just the mint recipient's
//! address, attested by a single signer. Pays a fixed amount out of its own
//! balance per message, and refuses to process a message twice.

use {
    anyhow::ensure,
    borsh::{BorshDeserialize, BorshSerialize},
    omo_host::{Contract, ContractBuilder, Item, MutableCtx, Response, Set},
    omo_types::{
        keccak256,
        messenger::{MessageTransmitterExecuteMsg, ReceiveMessageResponse},
        Addr, Hash256, Secp256k1, SignerRecovery, SIGNATURE_LENGTH,
    },
    serde::{Deserialize, Serialize},
    std::sync::Arc,
};

/// What the transmitter tells the caller about a processed message.
#[derive(
    Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Report {
    /// The account actually paid.
    Truthful,
    /// This account, whoever was actually paid.
    Recipient(Addr),
    /// Nothing at all.
    Silent,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InstantiateMsg {
    pub attester: Addr,
    pub token: Addr,
    pub amount: u128,
    pub report: Report,
}

#[derive(BorshSerialize, BorshDeserialize)]
struct Config {
    attester: Addr,
    token: Addr,
    amount: u128,
    report: Report,
}

const CONFIG: Item<Config> = Item::new("config");

const USED_MESSAGES: Set<Hash256> = Set::new("used_message");

pub fn contract() -> Arc<dyn Contract> {
    ContractBuilder::new(instantiate)
        .with_execute(execute)
        .build()
}

fn instantiate(mut ctx: MutableCtx, msg: InstantiateMsg) -> anyhow::Result<Response> {
    CONFIG.save(ctx.storage(), &Config {
        attester: msg.attester,
        token: msg.token,
        amount: msg.amount,
        report: msg.report,
    })?;

    Ok(Response::new())
}

fn execute(mut ctx: MutableCtx, msg: MessageTransmitterExecuteMsg) -> anyhow::Result<Response> {
    match msg {
        MessageTransmitterExecuteMsg::ReceiveMessage {
            message,
            attestation,
        } => {
            let cfg = CONFIG.load(ctx.storage())?;

            let signature = <&[u8; SIGNATURE_LENGTH]>::try_from(&attestation[..])
                .map_err(|_| anyhow::anyhow!("Invalid attestation length"))?;

            let digest = keccak256(&message);
            let signer = Secp256k1.recover(&digest, signature)?;

            ensure!(signer == cfg.attester, "Invalid signature: not attester");
            ensure!(
                !USED_MESSAGES.has(ctx.storage(), digest),
                "Nonce already used"
            );

            let mint_recipient = Addr::from_slice(&message)?;

            USED_MESSAGES.insert(ctx.storage(), digest)?;
            ctx.transfer_token(cfg.token, mint_recipient, cfg.amount)?;

            let mint_recipient = match cfg.report {
                Report::Truthful => mint_recipient,
                Report::Recipient(reported) => reported,
                Report::Silent => return Ok(Response::new()),
            };

            Ok(Response::new().set_data(&ReceiveMessageResponse {
                mint_recipient,
                amount: cfg.amount,
            })?)
        },
    }
}
