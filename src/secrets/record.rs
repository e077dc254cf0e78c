use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::pipeline::error::IssuanceError;

/// Account record stored in the secret. Only `password` is consumed; it holds
/// the base64 of a PEM-wrapped private key. Absent and `null` fields read as empty.
#[derive(Deserialize, Clone, Default)]
#[serde(default)]
pub struct SecretRecord {
    #[serde(deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub platformid: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub comment: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl SecretRecord {
    pub fn parse(secret_string: &str) -> Result<Self, IssuanceError> {
        // a bare `null` record is an empty record
        serde_json::from_str::<Option<Self>>(secret_string)
            .map(Option::unwrap_or_default)
            .map_err(|err| IssuanceError::MalformedSecret {
                reason: err.to_string(),
            })
    }
}

impl fmt::Debug for SecretRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretRecord")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("platformid", &self.platformid)
            .field("password", &"<redacted>")
            .field("comment", &self.comment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_record() {
        let record = SecretRecord::parse(
            r#"{"address":"a","username":"u","platformid":"p","password":"cGFzcw==","comment":"c"}"#,
        )
        .unwrap();
        assert_eq!(record.password, "cGFzcw==");
        assert_eq!(record.platformid, "p");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let record = SecretRecord::parse(r#"{"username":"svc"}"#).unwrap();
        assert_eq!(record.username, "svc");
        assert!(record.password.is_empty());
    }

    #[test]
    fn null_record_and_null_fields_read_as_empty() {
        for raw in ["null", r#"{"password":null}"#, r#"{"username":null,"password":null}"#] {
            let record = SecretRecord::parse(raw).unwrap();
            assert!(record.password.is_empty(), "raw {raw:?}");
            assert!(record.username.is_empty(), "raw {raw:?}");
        }
    }

    #[test]
    fn non_json_is_malformed() {
        for raw in ["", "not json", r#"{"password": 12}"#, "[1,2]"] {
            assert!(
                matches!(SecretRecord::parse(raw), Err(IssuanceError::MalformedSecret { .. })),
                "raw {raw:?}"
            );
        }
    }

    #[test]
    fn debug_hides_password() {
        let record = SecretRecord {
            password: "super-secret".into(),
            ..Default::default()
        };
        let printed = format!("{:?}", record);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
