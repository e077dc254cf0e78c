use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::secrets::{FetchSecret, SecretStoreError};

static BACKEND: &str = "file";

/// Secrets stored as `{dir}/{name}`, e.g. a mounted secrets volume.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    dir: PathBuf,
}

impl FileSecretStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

impl FetchSecret for FileSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String, SecretStoreError> {
        if !is_plain_name(name) {
            return Err(SecretStoreError::InvalidName {
                name: name.to_owned(),
            });
        }
        fs::read_to_string(self.dir.join(name))
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => SecretStoreError::NotFound {
                    name: name.to_owned(),
                },
                _ => SecretStoreError::Io {
                    name: name.to_owned(),
                    reason: err.to_string(),
                },
            })
    }

    fn backend(&self) -> &'static str {
        BACKEND
    }
}
