use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid bcrypt hash: {0}")]
    InvalidHash(String),

    #[error("Password encoding failed: {0}")]
    EncodingError(String),
}
