//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::FaucetConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the custodial private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "FAUCET_CUSTODY_PRIVATE_KEY";

/// Environment variable holding the bot credential for the inbound API.
pub const BOT_TOKEN_ENV_VAR: &str = "FAUCET_BOT_TOKEN";

/// Environment variable holding the admin API key.
pub const ADMIN_KEY_ENV_VAR: &str = "FAUCET_ADMIN_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Environment variable {0} not set")]
    MissingSecret(&'static str),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<FaucetConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<FaucetConfig, ConfigError> {
    let config: FaucetConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Secrets read from the environment, never from the config file.
pub struct Secrets {
    pub private_key: String,
    pub bot_token: String,
    pub admin_key: Option<String>,
}

impl Secrets {
    /// Read all secrets. The private key and bot token are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            private_key: required_env(PRIVATE_KEY_ENV_VAR)?,
            bot_token: required_env(BOT_TOKEN_ENV_VAR)?,
            admin_key: std::env::var(ADMIN_KEY_ENV_VAR)
                .ok()
                .filter(|v| !v.is_empty()),
        })
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("private_key", &"<redacted>")
            .field("bot_token", &"<redacted>")
            .field("admin_key", &self.admin_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn required_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::MissingSecret(name)),
    }
}
