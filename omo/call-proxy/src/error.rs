use {omo_types::Addr, thiserror::Error};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallProxyError {
    #[error("CallProxy: no privilege")]
    NoPrivilege { sender: Addr },

    #[error("Ownable: caller is not the owner")]
    NotOwner { sender: Addr },

    #[error("Ownable: new owner is the zero address")]
    OwnerZero,

    #[error("bridge address cannot be zero")]
    BridgeZero,
}

impl CallProxyError {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NoPrivilege { .. } => "NoPrivilege",
            Self::NotOwner { .. } => "NotAuthorized",
            Self::OwnerZero => "OwnerZero",
            Self::BridgeZero => "BridgeZero",
        }
    }
}
