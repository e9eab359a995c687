mod context;
mod contract;
mod counter;
mod encoders;
mod error;
mod host;
mod item;
mod key;
mod map;
mod response;
mod result;
mod set;
mod state;
mod storage;

pub use {
    context::*, contract::*, counter::*, encoders::*, error::*, host::*, item::*, key::*, map::*,
    response::*, result::*, set::*, state::*, storage::*,
};
