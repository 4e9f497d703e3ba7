//! Bitget module - market data fetchers for Bitget USDT-margined futures

pub mod auth;
pub mod messages;
pub mod rest;
pub mod weight;

pub use rest::BitgetRestClient;
