use std::path::PathBuf;

use thiserror::Error;

/// Error type for RSA key loading.
///
/// Messages name the offending file but never include key bytes.
#[derive(Debug, Clone, Error)]
pub enum KeyError {
    #[error("Failed to read key file {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Invalid {kind} key: {reason}")]
    InvalidKey { kind: &'static str, reason: String },

    #[error("Key pair does not match: {0}")]
    Mismatch(String),
}

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Signing keys unavailable: {0}")]
    KeyUnavailable(#[from] KeyError),
}
