//! Identity inputs: tenant / service-account identifiers and the region audience registry.

pub mod audience;
pub mod identifier;

pub use audience::{AudienceRegistry, AudienceUrl, AUDIENCES};
pub use identifier::{ServiceAccountId, TenantId};
