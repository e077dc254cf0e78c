pub mod handler;
pub mod server;

pub use handler::{invoke, InvocationContext, InvocationResponse, IssuerState};
