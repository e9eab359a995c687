mod error;
mod execute;
mod query;
mod state;

pub use {error::*, execute::*, query::*, state::*};

use {
    omo_host::{Contract, ContractBuilder},
    std::sync::Arc,
};

/// The call proxy contract, ready to be instantiated on a host.
pub fn contract() -> Arc<dyn Contract> {
    ContractBuilder::new(instantiate)
        .with_execute(execute)
        .with_query(query)
        .build()
}
