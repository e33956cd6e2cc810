pub mod claims;
pub mod errors;
pub mod handler;
pub mod keys;

pub use claims::Claims;
pub use claims::JwtDetails;
pub use errors::JwtError;
pub use errors::KeyError;
pub use handler::JwtHandler;
pub use keys::KeyMaterial;
pub use keys::KeyProvider;
