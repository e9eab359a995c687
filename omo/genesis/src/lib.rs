mod builder;
mod config;

pub use {builder::*, config::*};
