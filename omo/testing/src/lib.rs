mod account;
mod balance_tracker;
pub mod mocks;
mod setup;
mod suite;
mod tracing;

pub use {account::*, balance_tracker::*, setup::*, suite::*, tracing::*};
