pub mod claims;
pub mod issuer;

pub use claims::TokenClaims;
pub use issuer::{issue, issue_at, SignedToken};
