//! Secret store collaborators.
//!
//! The pipeline only needs `get_secret(name) -> secret string`. Backends are
//! dispatched through [`SecretStoreKind`]; tests and embedders may implement
//! [`FetchSecret`] directly.

use std::future::Future;

use reqwest::Client;
use thiserror::Error;

use crate::config::secret_store::SecretStoreConfig;

pub mod extension;
pub mod file;
pub mod memory;
pub mod record;

pub use extension::ExtensionSecretStore;
pub use file::FileSecretStore;
pub use memory::MemorySecretStore;
pub use record::SecretRecord;

#[derive(Debug, Error)]
pub enum SecretStoreError {
    #[error("secret '{name}' not found")]
    NotFound { name: String },

    #[error("secret name '{name}' is not allowed")]
    InvalidName { name: String },

    #[error("secret store credentials unavailable: {reason}")]
    Credentials { reason: String },

    #[error("secret store request failed: {reason}")]
    Transport { reason: String },

    #[error("secret store answered {status} for '{name}'")]
    Status { name: String, status: u16 },

    #[error("secret store response for '{name}' carries no secret string")]
    NoSecretString { name: String },

    #[error("reading secret '{name}' failed: {reason}")]
    Io { name: String, reason: String },
}

pub trait FetchSecret {
    fn get_secret(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<String, SecretStoreError>> + Send;

    /// Short backend label for logs and metrics.
    fn backend(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub enum SecretStoreKind {
    Extension(ExtensionSecretStore),
    File(FileSecretStore),
    Memory(MemorySecretStore),
}

impl FetchSecret for SecretStoreKind {
    async fn get_secret(&self, name: &str) -> Result<String, SecretStoreError> {
        match self {
            SecretStoreKind::Extension(s) => s.get_secret(name).await,
            SecretStoreKind::File(s) => s.get_secret(name).await,
            SecretStoreKind::Memory(s) => s.get_secret(name).await,
        }
    }

    fn backend(&self) -> &'static str {
        match self {
            SecretStoreKind::Extension(s) => s.backend(),
            SecretStoreKind::File(s) => s.backend(),
            SecretStoreKind::Memory(s) => s.backend(),
        }
    }
}

pub fn build_secret_store(cfg: &SecretStoreConfig, client: &Client) -> SecretStoreKind {
    match cfg {
        SecretStoreConfig::SecretsExtension {
            endpoint,
            session_token,
            version_stage,
        } => SecretStoreKind::Extension(ExtensionSecretStore::new(
            client.clone(),
            endpoint.to_owned(),
            session_token.clone(),
            version_stage.clone(),
        )),
        SecretStoreConfig::File { dir } => SecretStoreKind::File(FileSecretStore::new(dir)),
    }
}
