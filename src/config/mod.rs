// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::cli::Args;
use crate::error::{RelayError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

/// Deployment variable carrying the upstream credential.
pub const TOKEN_ENV: &str = "HF_TOKEN";
/// Deployment variable carrying the preferred model.
pub const MODEL_ENV: &str = "HF_MODEL";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest)
    /// 2. `HF_TOKEN` / `HF_MODEL`
    /// 3. `FOLIO_RELAY_*` environment variables
    /// 4. Config file
    /// 5. Defaults (lowest)
    pub fn load(args: &Args) -> Result<Self> {
        let path = args
            .config
            .clone()
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name(&path).required(args.config.is_some()))
            // FOLIO_RELAY_SERVER__PORT=9000, FOLIO_RELAY_UPSTREAM__FALLBACK_MODELS=a,b
            .add_source(
                Environment::with_prefix("FOLIO_RELAY")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .with_list_parse_key("upstream.fallback_models")
                    .try_parsing(true),
            )
            .set_override_option("upstream.token", non_empty_env(TOKEN_ENV))?
            .set_override_option("upstream.preferred_model", non_empty_env(MODEL_ENV))?
            .set_override_option("server.host", args.host.clone())?
            .set_override_option("server.port", args.port.map(i64::from))?
            .build()
            .map_err(|e| RelayError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| RelayError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".folio-relay")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
