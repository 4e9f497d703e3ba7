//! Configuration loader

use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

use super::types::AppConfig;
use crate::common::errors::{ClientError, Result};

/// Directory searched when the configuration name is not a path to an existing file
pub const CONFIG_DIR: &str = "config";

/// Resolve a configuration file name
///
/// The name is used as given when it points at a file, otherwise it is
/// looked up under [`CONFIG_DIR`] in the working directory.
pub fn resolve_config_path(name: &str) -> Result<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }

    let nested = Path::new(CONFIG_DIR).join(name);
    if nested.is_file() {
        return Ok(nested);
    }

    Err(ClientError::ConfigNotFound(name.to_string()))
}

/// Load configuration from a JSON file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with DS__, e.g. DS__EXCHANGE__API_KEY)
/// 2. Configuration file (JSON format)
/// 3. Default values
pub fn load_config(name: &str) -> Result<AppConfig> {
    let path = resolve_config_path(name)?;

    // Credentials are commonly kept in a .env file next to the config
    dotenvy::dotenv().ok();

    let config = Config::builder()
        .add_source(File::from(path.as_path()).format(FileFormat::Json).required(true))
        .add_source(
            Environment::with_prefix("DS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ClientError::Configuration(e.to_string()))
}
