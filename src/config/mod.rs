pub mod inputs;
pub mod proc_loader;
pub mod proc_validator;
pub mod secret_store;
pub mod settings;

pub use settings::ServiceConfig;
