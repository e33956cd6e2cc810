use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;
use thiserror::Error;

use crate::jwt::claims::ISSUER;
use crate::jwt::Claims;
use crate::jwt::JwtDetails;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::KeyProvider;

const BEARER_PREFIX: &str = "Bearer ";

/// Access and refresh tokens differ only in lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub const ACCESS_LIFETIME_SECONDS: i64 = 5 * 60;
    pub const REFRESH_LIFETIME_SECONDS: i64 = 7 * 24 * 60 * 60;

    pub fn lifetime_seconds(&self) -> i64 {
        match self {
            TokenKind::Access => Self::ACCESS_LIFETIME_SECONDS,
            TokenKind::Refresh => Self::REFRESH_LIFETIME_SECONDS,
        }
    }

    pub fn lifetime(&self) -> Duration {
        Duration::seconds(self.lifetime_seconds())
    }
}

/// Error type for token issuance and validation.
///
/// `Crypto` means the service itself is broken (keys missing, signing
/// failed). `Invalid` means the presented token was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token cryptography unavailable: {0}")]
    Crypto(String),

    #[error("Invalid token: {0}")]
    Invalid(String),
}

impl From<JwtError> for TokenError {
    fn from(error: JwtError) -> Self {
        match error {
            JwtError::KeyUnavailable(e) => TokenError::Crypto(e.to_string()),
            JwtError::EncodingFailed(e) => TokenError::Crypto(e),
            JwtError::TokenExpired => TokenError::Invalid("token is expired".to_string()),
            JwtError::InvalidToken(e) => TokenError::Invalid(e),
        }
    }
}

/// Mints and validates RS256 access/refresh tokens for this service.
pub struct TokenService {
    handler: JwtHandler,
    clock_skew_seconds: i64,
}

impl TokenService {
    pub fn new(keys: Arc<KeyProvider>) -> Self {
        Self {
            handler: JwtHandler::new(keys, ISSUER),
            clock_skew_seconds: 0,
        }
    }

    /// Accept `exp`/`iat` up to `seconds` off from the local clock.
    pub fn with_clock_skew(self, seconds: u64) -> Self {
        Self {
            handler: self.handler.with_leeway(seconds),
            clock_skew_seconds: i64::try_from(seconds).unwrap_or(i64::MAX),
        }
    }

    pub fn mint_access(&self, details: &JwtDetails) -> Result<String, TokenError> {
        self.mint(TokenKind::Access, details)
    }

    pub fn mint_refresh(&self, details: &JwtDetails) -> Result<String, TokenError> {
        self.mint(TokenKind::Refresh, details)
    }

    /// Sign a token of the given kind for `details`, issued now.
    ///
    /// # Errors
    /// * `Crypto` - Keys unavailable or signing failed
    pub fn mint(&self, kind: TokenKind, details: &JwtDetails) -> Result<String, TokenError> {
        let claims = Claims::for_user(ISSUER, details, Utc::now(), kind.lifetime());
        Ok(self.handler.encode(&claims)?)
    }

    /// Verify a token and return its claims.
    ///
    /// A single leading `Bearer ` is stripped. Signature (RS256 only),
    /// issuer, `exp > now` and `iat <= now` are checked, each within the
    /// configured clock skew.
    ///
    /// # Errors
    /// * `Crypto` - Keys unavailable
    /// * `Invalid` - Any check failed
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let token = strip_bearer(token);
        let claims: Claims = self.handler.decode(token)?;

        let now = Utc::now().timestamp();
        if claims.is_expired(now.saturating_sub(self.clock_skew_seconds)) {
            return Err(TokenError::Invalid("token is expired".to_string()));
        }
        if claims.is_issued_in_future(now.saturating_add(self.clock_skew_seconds)) {
            return Err(TokenError::Invalid("token issued in the future".to_string()));
        }

        Ok(claims)
    }

    /// Email claim of a valid token.
    ///
    /// Empty, invalid or email-less tokens yield `None`; only key failures
    /// are reported as errors.
    pub fn email_of(&self, token: &str) -> Result<Option<String>, TokenError> {
        if strip_bearer(token).trim().is_empty() {
            return Ok(None);
        }

        match self.validate(token) {
            Ok(claims) => Ok(claims.email.filter(|email| !email.is_empty())),
            Err(TokenError::Invalid(reason)) => {
                tracing::debug!(%reason, "Rejected token");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_valid(&self, token: &str) -> Result<bool, TokenError> {
        match self.validate(token) {
            Ok(_) => Ok(true),
            Err(TokenError::Invalid(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn strip_bearer(token: &str) -> &str {
    token.strip_prefix(BEARER_PREFIX).unwrap_or(token)
}
