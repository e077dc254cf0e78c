//! # Service-Account Token Issuer
//!
//! Issues short-lived RS256 identity tokens for external service accounts.
//! Tenant and service-account identifiers are validated, the region is mapped
//! to its audience, the PKCS#1 signing key is read from a secret store and the
//! signed token is returned through an HTTP boundary.
//!
//! Modules:
//! - `config`: service configuration, per-invocation inputs
//! - `identity`: identifier validation and the region audience registry
//! - `secrets`: secret store backends
//! - `keys`: signing key acquisition and decoding
//! - `token`: claims and RS256 signing
//! - `pipeline`: stage orchestration and error taxonomy
//! - `server`: invocation boundary and metrics route

pub mod config;
pub mod identity;
pub mod keys;
pub mod observability;
pub mod pipeline;
pub mod secrets;
pub mod server;
pub mod token;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::config::ServiceConfig;
pub use crate::pipeline::{PipelineError, TokenPipeline};
