use std::fmt;

use jsonwebtoken::EncodingKey;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::RsaPrivateKey;

use crate::pipeline::error::IssuanceError;

/// RSA private key accepted for signing. Only the PKCS#1 `RSAPrivateKey`
/// structure is accepted; PKCS#8 wrapping is refused.
///
/// Lives for one issuance and is dropped with it.
#[derive(Clone)]
pub struct SigningKey(RsaPrivateKey);

impl SigningKey {
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self, IssuanceError> {
        RsaPrivateKey::from_pkcs1_der(der)
            .map(Self)
            .map_err(|err| IssuanceError::UnsupportedKeyFormat {
                reason: err.to_string(),
            })
    }

    pub fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }

    /// jsonwebtoken wants the PKCS#1 DER for RSA keys.
    pub fn encoding_key(&self) -> Result<EncodingKey, IssuanceError> {
        let der = self
            .0
            .to_pkcs1_der()
            .map_err(|err| IssuanceError::Signing {
                reason: err.to_string(),
            })?;
        Ok(EncodingKey::from_rsa_der(der.as_bytes()))
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}
