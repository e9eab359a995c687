use {omo_types::Addr, thiserror::Error};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StdError {
    #[error("data not found! type: {ty}, storage key: {key}")]
    DataNotFound { ty: &'static str, key: String },

    #[error("failed to serialize! type: {ty}, reason: {reason}")]
    Serialize { ty: &'static str, reason: String },

    #[error("failed to deserialize! type: {ty}, reason: {reason}")]
    Deserialize { ty: &'static str, reason: String },

    #[error("overflow when incrementing counter `{key}`")]
    Overflow { key: String },
}

impl StdError {
    pub fn data_not_found<T>(key: &[u8]) -> Self {
        Self::DataNotFound {
            ty: std::any::type_name::<T>(),
            key: String::from_utf8_lossy(key).into_owned(),
        }
    }

    pub fn serialize<T>(reason: impl ToString) -> Self {
        Self::Serialize {
            ty: std::any::type_name::<T>(),
            reason: reason.to_string(),
        }
    }

    pub fn deserialize<T>(reason: impl ToString) -> Self {
        Self::Deserialize {
            ty: std::any::type_name::<T>(),
            reason: reason.to_string(),
        }
    }
}

pub type StdResult<T> = core::result::Result<T, StdError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("contract not found: {address}")]
    ContractNotFound { address: Addr },

    #[error("contract does not implement `{name}`")]
    FunctionNotFound { name: &'static str },

    #[error("account with address `{address}` already exists")]
    AccountExists { address: Addr },

    #[error("token not found: {token}")]
    TokenNotFound { token: Addr },

    #[error("ERC20: transfer amount exceeds balance")]
    InsufficientBalance {
        token: Addr,
        owner: Addr,
        balance: u128,
        amount: u128,
    },

    #[error("ERC20: insufficient allowance")]
    InsufficientAllowance {
        token: Addr,
        owner: Addr,
        spender: Addr,
        allowance: u128,
        amount: u128,
    },

    #[error("insufficient native balance! owner: {owner}, balance: {balance}, amount: {amount}")]
    InsufficientNative {
        owner: Addr,
        balance: u128,
        amount: u128,
    },

    #[error("balance overflow! account: {account}")]
    BalanceOverflow { account: Addr },

    #[error("max call depth exceeded")]
    ExceedMaxCallDepth,
}

impl HostError {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Std(_) => "StdError",
            Self::ContractNotFound { .. } => "ContractNotFound",
            Self::FunctionNotFound { .. } => "FunctionNotFound",
            Self::AccountExists { .. } => "AccountExists",
            Self::TokenNotFound { .. } => "TokenNotFound",
            Self::InsufficientBalance { .. } => "InsufficientBalance",
            Self::InsufficientAllowance { .. } => "InsufficientAllowance",
            Self::InsufficientNative { .. } => "InsufficientNative",
            Self::BalanceOverflow { .. } => "BalanceOverflow",
            Self::ExceedMaxCallDepth => "ExceedMaxCallDepth",
        }
    }
}

pub type HostResult<T> = core::result::Result<T, HostError>;
