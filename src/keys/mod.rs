pub mod acquirer;
pub mod signing_key;

pub use acquirer::{acquire, decode_private_key};
pub use signing_key::SigningKey;
