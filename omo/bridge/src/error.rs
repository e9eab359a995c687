use {
    omo_quorum::QuorumError,
    omo_types::{bridge::Domain, Addr, CodecError},
    thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("Ownable: caller is not the owner")]
    NotOwner { sender: Addr },

    #[error("caller is neither the owner nor the fee collector")]
    NotFeeCollector { sender: Addr },

    #[error("Ownable: new owner is the zero address")]
    OwnerZero,

    #[error("Inconsistent parameter lengths")]
    InconsistentParameterLengths { domains: usize, bridges: usize },

    #[error("token address cannot be zero")]
    TokenZero,

    #[error("tokenMessenger address cannot be zero")]
    TokenMessengerZero,

    #[error("New attester must be nonzero")]
    AttesterZero,

    #[error("feeCollector address cannot be zero")]
    FeeCollectorZero,

    #[error("callProxy address cannot be zero")]
    CallProxyZero,

    #[error("signature threshold must be at least 1")]
    InvalidSignatureThreshold,

    #[error("Pausable: paused")]
    Paused,

    #[error("Pausable: not paused")]
    NotPaused,

    #[error("forbidden")]
    Forbidden,

    #[error("target bridge not enabled")]
    RouteNotEnabled { domain: Domain },

    #[error("recipient address cannot be zero")]
    RecipientZero,

    #[error("token not enabled")]
    TokenNotEnabled { token: Addr },

    #[error("route disabled")]
    RouteDisabled { token: Addr, domain: Domain },

    #[error("invalid bridgeIn args")]
    InvalidBridgeInArgs,

    #[error("amount cannot be zero")]
    AmountZero,

    #[error("mint recipient mismatch! expecting: {expect}, got: {actual}")]
    RecipientMismatch { expect: Addr, actual: Addr },

    #[error("token messenger returned no burn nonce")]
    MissingBurnNonce,

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Quorum(#[from] QuorumError),
}

impl BridgeError {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotOwner { .. } | Self::NotFeeCollector { .. } => "NotAuthorized",
            Self::OwnerZero => "OwnerZero",
            Self::InconsistentParameterLengths { .. } => "InconsistentParameterLengths",
            Self::TokenZero => "TokenZero",
            Self::TokenMessengerZero => "TokenMessengerZero",
            Self::AttesterZero => "AttesterZero",
            Self::FeeCollectorZero => "FeeCollectorZero",
            Self::CallProxyZero => "CallProxyZero",
            Self::InvalidSignatureThreshold => "InvalidSignatureThreshold",
            Self::Paused => "Paused",
            Self::NotPaused => "NotPaused",
            Self::Forbidden => "Forbidden",
            Self::RouteNotEnabled { .. } => "RouteNotEnabled",
            Self::RecipientZero => "RecipientZero",
            Self::TokenNotEnabled { .. } => "TokenNotEnabled",
            Self::RouteDisabled { .. } => "RouteDisabled",
            Self::InvalidBridgeInArgs => "InvalidBridgeInArgs",
            Self::AmountZero => "AmountZero",
            Self::RecipientMismatch { .. } => "RecipientMismatch",
            Self::MissingBurnNonce => "MissingBurnNonce",
            Self::Codec(err) => err.reason(),
            Self::Quorum(err) => err.reason(),
        }
    }
}
