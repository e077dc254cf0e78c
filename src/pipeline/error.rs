use std::fmt;

use thiserror::Error;

use crate::secrets::SecretStoreError;

/// Every way a single issuance can fail.
///
/// Variants carry only diagnostics that are safe to log: never key material,
/// never the decoded secret.
#[derive(Debug, Error)]
pub enum IssuanceError {
    #[error("no identifier provided")]
    MissingIdentifier,

    #[error("invalid identifier provided: {value}")]
    InvalidIdentifier { value: String },

    #[error("no region provided")]
    MissingRegion,

    #[error("invalid region provided: {region}. Valid regions are: {valid}")]
    UnsupportedRegion { region: String, valid: String },

    #[error("no secret name provided")]
    MissingSecretName,

    #[error(transparent)]
    SecretStore(#[from] SecretStoreError),

    #[error("secret is not a valid JSON record: {reason}")]
    MalformedSecret { reason: String },

    #[error("private key is not valid base64: {reason}")]
    InvalidEncoding { reason: String },

    #[error("no private key material in secret")]
    EmptyKeyMaterial,

    #[error("unable to decode private key PEM: {reason}")]
    InvalidPem { reason: String },

    #[error("private key is not a PKCS#1 RSA key: {reason}")]
    UnsupportedKeyFormat { reason: String },

    #[error("token signing failed: {reason}")]
    Signing { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Identifiers, region or secret name rejected before any I/O.
    Input,
    /// Secret store, secret payload or signing.
    Backend,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Backend => "backend",
        }
    }
}

impl IssuanceError {
    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            IssuanceError::MissingIdentifier => "missing_identifier",
            IssuanceError::InvalidIdentifier { .. } => "invalid_identifier",
            IssuanceError::MissingRegion => "missing_region",
            IssuanceError::UnsupportedRegion { .. } => "unsupported_region",
            IssuanceError::MissingSecretName => "missing_secret_name",
            IssuanceError::SecretStore(_) => "secret_store_error",
            IssuanceError::MalformedSecret { .. } => "malformed_secret",
            IssuanceError::InvalidEncoding { .. } => "invalid_encoding",
            IssuanceError::EmptyKeyMaterial => "empty_key_material",
            IssuanceError::InvalidPem { .. } => "invalid_pem",
            IssuanceError::UnsupportedKeyFormat { .. } => "unsupported_key_format",
            IssuanceError::Signing { .. } => "signing_error",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            IssuanceError::MissingIdentifier
            | IssuanceError::InvalidIdentifier { .. }
            | IssuanceError::MissingRegion
            | IssuanceError::UnsupportedRegion { .. }
            | IssuanceError::MissingSecretName => ErrorCategory::Input,
            _ => ErrorCategory::Backend,
        }
    }
}

/// Pipeline step, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidateTenant,
    ValidateServiceAccount,
    ResolveAudience,
    AcquireKey,
    IssueToken,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ValidateTenant => "validate_tenant",
            Stage::ValidateServiceAccount => "validate_service_account",
            Stage::ResolveAudience => "resolve_audience",
            Stage::AcquireKey => "acquire_key",
            Stage::IssueToken => "issue_token",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An [`IssuanceError`] tagged with the stage that produced it.
#[derive(Debug, Error)]
#[error("{stage}: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: IssuanceError,
}

impl PipelineError {
    pub fn kind(&self) -> &'static str {
        self.source.kind()
    }
}

pub trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T> AtStage<T> for Result<T, IssuanceError> {
    fn at(self, stage: Stage) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError { stage, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_error_is_prefixed_with_stage() {
        let err: Result<(), _> = Err(IssuanceError::MissingRegion);
        let err = err.at(Stage::ResolveAudience).unwrap_err();
        assert_eq!(err.to_string(), "resolve_audience: no region provided");
        assert_eq!(err.kind(), "missing_region");
    }

    #[test]
    fn categories_split_input_from_backend() {
        assert_eq!(IssuanceError::MissingIdentifier.category(), ErrorCategory::Input);
        assert_eq!(IssuanceError::MissingSecretName.category(), ErrorCategory::Input);
        assert_eq!(IssuanceError::EmptyKeyMaterial.category(), ErrorCategory::Backend);
        assert_eq!(
            IssuanceError::Signing { reason: "x".into() }.category(),
            ErrorCategory::Backend
        );
    }
}
