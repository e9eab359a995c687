mod address;
pub mod bridge;
pub mod call_proxy;
mod codec;
mod crypto;
mod event;
mod hex_binary;
pub mod messenger;
pub mod token;

pub use {address::*, codec::*, crypto::*, event::*, hex_binary::*};
