use {
    config::{Config, ConfigError, Environment, File},
    omo_types::{bridge::Domain, Addr, Addr32},
    serde::Deserialize,
    std::path::Path,
};

/// Prefix of the environment variables that override the file, e.g.
/// `OMO__BRIDGE__SIGNATURE_THRESHOLD=2`.
pub const ENV_PREFIX: &str = "OMO";

const ENV_SEPARATOR: &str = "__";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenesisConfig {
    pub bridge: BridgeGenesis,
    #[serde(default)]
    pub call_proxy: CallProxyGenesis,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BridgeGenesis {
    /// Instantiates both contracts, and so becomes their owner.
    pub owner: Addr,
    pub token_messenger: Addr,
    pub fee_collector: Addr,
    /// The first one is enabled at instantiation, the rest afterwards.
    pub attesters: Vec<Addr>,
    #[serde(default = "default_signature_threshold")]
    pub signature_threshold: u32,
    #[serde(default)]
    pub routes: Vec<RouteBinding>,
    #[serde(default)]
    pub disabled_tokens: Vec<Addr>,
    #[serde(default)]
    pub disabled_routes: Vec<Route>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteBinding {
    pub domain: Domain,
    pub bridge: Addr32,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub token: Addr,
    pub domain: Domain,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CallProxyGenesis {
    #[serde(default)]
    pub deploy: bool,
}

fn default_signature_threshold() -> u32 {
    1
}

impl GenesisConfig {
    /// Read the config from a file, overridden by `OMO__`-prefixed
    /// environment variables.
    pub fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    pub fn load_with_env_prefix<P>(path: P, prefix: &str) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let env_override = Environment::with_prefix(prefix).separator(ENV_SEPARATOR);

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_override)
            .build()?
            .try_deserialize()
    }
}

// ----------------------------------- tests -----------------------------------
