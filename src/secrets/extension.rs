use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::secret_store::GenericSourceValue;
use crate::secrets::{FetchSecret, SecretStoreError};
use crate::utils::constants::SECRETS_EXTENSION_TOKEN_HEADER;

static BACKEND: &str = "secrets_extension";

/// Subset of the Secrets Manager `GetSecretValue` response we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetSecretValueResponse {
    secret_string: Option<String>,
    version_id: Option<String>,
}

/// Reads secrets through the Parameters and Secrets Lambda Extension.
///
/// `GET {endpoint}/secretsmanager/get?secretId=..&versionStage=..`, authenticated
/// with the execution environment's session token. No retry: a failure is
/// reported as-is.
#[derive(Debug, Clone)]
pub struct ExtensionSecretStore {
    client: Client,
    endpoint: String,
    session_token: GenericSourceValue,
    version_stage: Option<String>,
}

impl ExtensionSecretStore {
    pub fn new(
        client: Client,
        endpoint: String,
        session_token: GenericSourceValue,
        version_stage: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            session_token,
            version_stage,
        }
    }
}

impl FetchSecret for ExtensionSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String, SecretStoreError> {
        let token = self
            .session_token
            .resolve()
            .await
            .map_err(|err| SecretStoreError::Credentials {
                reason: err.to_string(),
            })?;

        let url = format!("{}/secretsmanager/get", self.endpoint);
        let mut query = vec![("secretId", name)];
        if let Some(stage) = &self.version_stage {
            query.push(("versionStage", stage.as_str()));
        }

        let response = self
            .client
            .get(&url)
            .header(SECRETS_EXTENSION_TOKEN_HEADER, token)
            .query(&query)
            .send()
            .await
            .map_err(|err| SecretStoreError::Transport {
                reason: err.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SecretStoreError::NotFound {
                name: name.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(SecretStoreError::Status {
                name: name.to_owned(),
                status: status.as_u16(),
            });
        }

        let body: GetSecretValueResponse =
            response
                .json()
                .await
                .map_err(|err| SecretStoreError::Transport {
                    reason: err.to_string(),
                })?;
        debug!(secret = %name, version = ?body.version_id, "secret fetched");

        body.secret_string
            .ok_or_else(|| SecretStoreError::NoSecretString {
                name: name.to_owned(),
            })
    }

    fn backend(&self) -> &'static str {
        BACKEND
    }
}
