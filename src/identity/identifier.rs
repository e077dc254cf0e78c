use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::error::IssuanceError;

static IDENTIFIER_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]{32}$").expect("identifier pattern compiles"));

/// Lowercase `raw` and check it is exactly 32 ASCII lowercase letters or digits.
///
/// Shared by tenant and service-account identifiers; the caller decides which
/// role the returned value plays.
pub fn validate(raw: &str) -> Result<String, IssuanceError> {
    if raw.is_empty() {
        return Err(IssuanceError::MissingIdentifier);
    }
    let normalized = raw.to_lowercase();
    if !IDENTIFIER_FORMAT.is_match(&normalized) {
        return Err(IssuanceError::InvalidIdentifier {
            value: raw.to_owned(),
        });
    }
    Ok(normalized)
}

/// Owning organization of the service account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    pub fn parse(raw: &str) -> Result<Self, IssuanceError> {
        validate(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The calling principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceAccountId(String);

impl ServiceAccountId {
    pub fn parse(raw: &str) -> Result<Self, IssuanceError> {
        validate(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
