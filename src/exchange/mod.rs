//! Exchange access layer

pub mod indicators;
pub mod proxy;

pub use proxy::{Exchange, ExchangeStatus};
