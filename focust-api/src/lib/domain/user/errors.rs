use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),

    #[error("User id must not be negative: {0}")]
    Negative(i64),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all user and authentication operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Page number must be at least 1, got {0}")]
    InvalidPageNumber(i64),

    // Domain-level errors
    #[error("A user with this email already exists")]
    UserAlreadyExists,

    #[error("Email is already registered: {0}")]
    DuplicateEmail(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("The provided username (email) or password is incorrect. Please try again!")]
    IncorrectSignIn,

    #[error("Refresh token is missing or invalid")]
    InvalidRefresh,

    #[error("User of the refresh token no longer exists")]
    Unauthorized,

    #[error("Page {0} has no users")]
    EmptyPage(u32),

    // Infrastructure errors
    #[error("Token error: {0}")]
    Crypto(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<TokenError> for UserError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Crypto(msg) => UserError::Crypto(msg),
            TokenError::Invalid(_) => UserError::InvalidRefresh,
        }
    }
}
