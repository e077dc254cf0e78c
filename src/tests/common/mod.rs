// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding};
use rsa::pkcs8::EncodePrivateKey;
use rsa::rand_core::OsRng;
use rsa::RsaPrivateKey;

use crate::keys::SigningKey;
use crate::secrets::{FetchSecret, MemorySecretStore, SecretStoreError};
use crate::token::TokenClaims;

pub const TENANT_ID: &str = "11ed307a252abc12345ab76ae4e1234a";
pub const SERVICE_ACCOUNT_ID: &str = "12ed305a257abc15645ab76ae4e1234a";
pub const US_AUDIENCE: &str = "https://auth.alero.io/auth/realms/serviceaccounts";
pub const SECRET_NAME: &str = "cybr-sa-key";

static TEST_KEY: OnceLock<RsaPrivateKey> = OnceLock::new();

/// One 2048-bit key shared by the whole test binary; generation is slow.
pub fn test_rsa_key() -> &'static RsaPrivateKey {
    TEST_KEY.get_or_init(|| RsaPrivateKey::new(&mut OsRng, 2048).expect("rsa key generation"))
}

pub fn pkcs1_pem(key: &RsaPrivateKey) -> String {
    key.to_pkcs1_pem(LineEnding::LF).expect("pkcs1 pem").to_string()
}

pub fn pkcs8_pem(key: &RsaPrivateKey) -> String {
    key.to_pkcs8_pem(LineEnding::LF).expect("pkcs8 pem").to_string()
}

/// Secret string in the stored credential shape, PEM base64-encoded in `password`.
pub fn secret_record_json(pem: &str) -> String {
    json!({
        "address": "https://vault.example",
        "username": "sa-user",
        "platformid": "ExternalServiceAccount",
        "password": STANDARD.encode(pem),
        "comment": ""
    })
    .to_string()
}

pub fn signing_key() -> SigningKey {
    let der = test_rsa_key().to_pkcs1_der().expect("pkcs1 der");
    SigningKey::from_pkcs1_der(der.as_bytes()).expect("signing key")
}

/// Memory store holding a valid record for [`SECRET_NAME`].
pub fn memory_store_with_key() -> MemorySecretStore {
    MemorySecretStore::with_secret(SECRET_NAME, secret_record_json(&pkcs1_pem(test_rsa_key())))
}

/// Verifies signature, `exp` and `aud` against the shared test key.
pub fn decode_claims(token: &str, audience: &str) -> TokenClaims {
    let public_pem = test_rsa_key()
        .to_public_key()
        .to_pkcs1_pem(LineEnding::LF)
        .expect("public pem");
    let key = DecodingKey::from_rsa_pem(public_pem.as_bytes()).expect("decoding key");
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[audience]);
    decode::<TokenClaims>(token, &key, &validation)
        .expect("token verifies")
        .claims
}

/// Store wrapper counting how often the pipeline reached the secret store.
#[derive(Debug, Clone, Default)]
pub struct CountingStore {
    pub inner: MemorySecretStore,
    pub calls: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new(inner: MemorySecretStore) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FetchSecret for CountingStore {
    async fn get_secret(&self, name: &str) -> Result<String, SecretStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_secret(name).await
    }

    fn backend(&self) -> &'static str {
        "counting"
    }
}

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}
