use std::fmt;

use crate::pipeline::error::IssuanceError;

const BUILTIN_AUDIENCES: [(&str, &str); 7] = [
    ("us", "https://auth.alero.io/auth/realms/serviceaccounts"),
    ("eu", "https://auth.alero.eu/auth/realms/serviceaccounts"),
    ("canada", "https://auth.ca.alero.io/auth/realms/serviceaccounts"),
    ("australia", "https://auth.au.alero.io/auth/realms/serviceaccounts"),
    ("london", "https://auth.uk.alero.io/auth/realms/serviceaccounts"),
    ("india", "https://auth.in.alero.io/auth/realms/serviceaccounts"),
    ("singapore", "https://auth.sg.alero.io/auth/realms/serviceaccounts"),
];

/// Region registry shipped with the binary.
pub static AUDIENCES: AudienceRegistry = AudienceRegistry::new(&BUILTIN_AUDIENCES);

/// Verifier endpoint a token is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudienceUrl(&'static str);

impl AudienceUrl {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for AudienceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Immutable region -> audience mapping. Keys are lowercase.
#[derive(Debug)]
pub struct AudienceRegistry {
    entries: &'static [(&'static str, &'static str)],
}

impl AudienceRegistry {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn resolve(&self, region: &str) -> Result<AudienceUrl, IssuanceError> {
        if region.is_empty() {
            return Err(IssuanceError::MissingRegion);
        }
        let key = region.to_lowercase();
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|&(_, url)| AudienceUrl(url))
            .ok_or_else(|| IssuanceError::UnsupportedRegion {
                region: region.to_owned(),
                valid: self.regions().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn regions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}
