//! Configuration loading and types

pub mod loader;
pub mod types;

pub use loader::{load_config, resolve_config_path};
pub use types::AppConfig;
