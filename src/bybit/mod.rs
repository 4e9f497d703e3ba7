//! Bybit module - REST client for Bybit USDT perpetual futures

pub mod auth;
pub mod messages;
pub mod rest;

pub use rest::BybitRestClient;
