//! Stand-ins for the collaborators a bridge deployment talks to.

pub mod message_transmitter;
pub mod pool;
pub mod token_messenger;
