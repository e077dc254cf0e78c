//! Token issuance pipeline and its error taxonomy.

pub mod error;
pub mod orchestrator;

pub use error::{ErrorCategory, IssuanceError, PipelineError, Stage};
pub use orchestrator::TokenPipeline;
