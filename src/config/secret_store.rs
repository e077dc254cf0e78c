use std::env;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;

use crate::utils::constants::{
    DEFAULT_SECRETS_EXTENSION_ENDPOINT, DEFAULT_VERSION_STAGE, ENV_AWS_SESSION_TOKEN,
};

/// ================================
/// Secret store backend
/// ================================
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecretStoreConfig {
    /// AWS Parameters and Secrets Lambda Extension (local HTTP cache of Secrets Manager).
    SecretsExtension {
        #[serde(default = "default_extension_endpoint")]
        endpoint: String,
        #[serde(default = "default_session_token")]
        session_token: GenericSourceValue,
        /// `null` in YAML omits the stage and lets the store pick its default.
        #[serde(default = "default_version_stage")]
        version_stage: Option<String>,
    },
    /// One file per secret, named after the secret, inside `dir`.
    File { dir: String },
}

/// Where a configuration value comes from.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum GenericSourceValue {
    Literal { value: String },
    FromEnv { from_env: String },
    FromFile { path: String },
}

impl GenericSourceValue {
    /// Resolved on every call; env and files may change under a long-lived process.
    pub async fn resolve(&self) -> Result<String> {
        match self {
            GenericSourceValue::Literal { value } => Ok(value.to_owned()),
            GenericSourceValue::FromEnv { from_env } => env::var(from_env)
                .map_err(|err| anyhow!("env variable '{}' is not readable: {}", from_env, err)),
            GenericSourceValue::FromFile { path } => fs::read_to_string(path)
                .await
                .map(|content| content.trim().to_string())
                .map_err(|err| anyhow!("file '{}' is not readable: {}", path, err)),
        }
    }
}

fn default_extension_endpoint() -> String {
    DEFAULT_SECRETS_EXTENSION_ENDPOINT.to_string()
}

fn default_session_token() -> GenericSourceValue {
    GenericSourceValue::FromEnv {
        from_env: ENV_AWS_SESSION_TOKEN.to_string(),
    }
}

fn default_version_stage() -> Option<String> {
    Some(DEFAULT_VERSION_STAGE.to_string())
}
