use std::collections::HashMap;
use std::sync::Arc;

use crate::secrets::{FetchSecret, SecretStoreError};

static BACKEND: &str = "memory";

/// In-process secrets, for embedding the pipeline and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    secrets: Arc<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new(secrets: HashMap<String, String>) -> Self {
        Self {
            secrets: Arc::new(secrets),
        }
    }

    pub fn with_secret(name: impl Into<String>, secret_string: impl Into<String>) -> Self {
        Self::new(HashMap::from([(name.into(), secret_string.into())]))
    }
}

impl FetchSecret for MemorySecretStore {
    async fn get_secret(&self, name: &str) -> Result<String, SecretStoreError> {
        self.secrets
            .get(name)
            .cloned()
            .ok_or_else(|| SecretStoreError::NotFound {
                name: name.to_owned(),
            })
    }

    fn backend(&self) -> &'static str {
        BACKEND
    }
}
