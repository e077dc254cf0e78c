use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, Header};

use crate::identity::{AudienceUrl, ServiceAccountId, TenantId};
use crate::keys::SigningKey;
use crate::pipeline::error::IssuanceError;
use crate::token::claims::TokenClaims;

/// Compact JWS `header.payload.signature`.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedToken(String);

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignedToken(<{} bytes>)", self.0.len())
    }
}

pub fn issue(
    tenant_id: &TenantId,
    service_account_id: &ServiceAccountId,
    audience: &AudienceUrl,
    key: &SigningKey,
) -> Result<SignedToken, IssuanceError> {
    issue_at(tenant_id, service_account_id, audience, key, Utc::now())
}

/// Sign a fresh claim set issued at `now` with RS256.
pub fn issue_at(
    tenant_id: &TenantId,
    service_account_id: &ServiceAccountId,
    audience: &AudienceUrl,
    key: &SigningKey,
    now: DateTime<Utc>,
) -> Result<SignedToken, IssuanceError> {
    let claims = TokenClaims::new(tenant_id, service_account_id, audience, now);
    let encoding_key = key.encoding_key()?;
    encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map(SignedToken)
        .map_err(|err| IssuanceError::Signing {
            reason: err.to_string(),
        })
}
