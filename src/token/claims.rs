use chrono::{DateTime, Utc};
use rand::distr::Alphabetic;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::identity::{AudienceUrl, ServiceAccountId, TenantId};

pub const TOKEN_LIFETIME_SECONDS: i64 = 5 * 60;
pub const TOKEN_ID_LENGTH: usize = 20;
pub const PRINCIPAL_SUFFIX: &str = "ExternalServiceAccount";

/// Claim set of an issued token. `iss` and `sub` carry the same principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl TokenClaims {
    pub fn new(
        tenant_id: &TenantId,
        service_account_id: &ServiceAccountId,
        audience: &AudienceUrl,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let principal = principal(tenant_id, service_account_id);
        let iat = issued_at.timestamp();
        Self {
            iss: principal.clone(),
            sub: principal,
            aud: audience.as_str().to_owned(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECONDS,
            jti: generate_token_id(),
        }
    }
}

/// `<tenant>.<service account>.ExternalServiceAccount`
pub fn principal(tenant_id: &TenantId, service_account_id: &ServiceAccountId) -> String {
    format!("{}.{}.{}", tenant_id, service_account_id, PRINCIPAL_SUFFIX)
}

/// Random `[a-zA-Z]{20}` nonce. Uniqueness matters, unpredictability does not.
pub fn generate_token_id() -> String {
    rand::rng()
        .sample_iter(&Alphabetic)
        .take(TOKEN_ID_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::AUDIENCES;
    use std::collections::HashSet;

    #[test]
    fn token_id_is_twenty_letters() {
        for _ in 0..100 {
            let id = generate_token_id();
            assert_eq!(id.len(), TOKEN_ID_LENGTH);
            assert!(id.chars().all(|c| c.is_ascii_alphabetic()), "{id}");
        }
    }

    #[test]
    fn token_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_token_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn claims_follow_principal_and_window() {
        let tenant = TenantId::parse("11ed307a252abc12345ab76ae4e1234a").unwrap();
        let account = ServiceAccountId::parse("12ED305A257ABC15645AB76AE4E1234A").unwrap();
        let audience = AUDIENCES.resolve("eu").unwrap();
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let claims = TokenClaims::new(&tenant, &account, &audience, issued_at);
        assert_eq!(
            claims.iss,
            "11ed307a252abc12345ab76ae4e1234a.12ed305a257abc15645ab76ae4e1234a.ExternalServiceAccount"
        );
        assert_eq!(claims.sub, claims.iss);
        assert_eq!(claims.aud, "https://auth.alero.eu/auth/realms/serviceaccounts");
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp - claims.iat, 300);
    }
}
