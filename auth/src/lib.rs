//! Authentication primitives for the focust API
//!
//! - Password hashing and verification over bcrypt crypt strings
//! - RSA key loading for RS256 signing and verification
//! - Access/refresh token issuance and validation
//!
//! The service crate composes these behind its own ports; nothing here knows
//! about users, storage or HTTP.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::BcryptHash;
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(4).unwrap();
//! let hash = hasher.encode("my_password").unwrap();
//! assert!(hasher.matches("my_password", &hash).unwrap());
//!
//! // Stored form round-trips through the crypt string
//! let stored = hash.to_string();
//! assert_eq!(BcryptHash::from_string(&stored).unwrap(), hash);
//! ```
//!
//! ## Tokens
//! ```no_run
//! use std::sync::Arc;
//!
//! use auth::JwtDetails;
//! use auth::KeyProvider;
//! use auth::TokenService;
//!
//! let keys = Arc::new(KeyProvider::from_paths("keys/public_key.der", "keys/private_key.der"));
//! let tokens = TokenService::new(keys).with_clock_skew(30);
//!
//! let access = tokens.mint_access(&JwtDetails::new(1, "user@focust.local")).unwrap();
//! let email = tokens.email_of(&format!("Bearer {}", access)).unwrap();
//! assert_eq!(email.as_deref(), Some("user@focust.local"));
//! ```

pub mod jwt;
pub mod password;
pub mod tokens;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtDetails;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::KeyError;
pub use jwt::KeyMaterial;
pub use jwt::KeyProvider;
pub use password::BcryptHash;
pub use password::BcryptVersion;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use tokens::TokenError;
pub use tokens::TokenKind;
pub use tokens::TokenService;
