use async_trait::async_trait;

use crate::domain::auth::models::IssuedTokens;
use crate::domain::auth::models::RefreshedAccess;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::SignInCommand;
use crate::user::errors::UserError;

/// Port for account registration and token issuance.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create an account and issue its first token pair.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Crypto` - Token signing failed
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<IssuedTokens, UserError>;

    /// Check credentials and issue a token pair.
    ///
    /// # Errors
    /// * `UserNotFound` - No account with this email
    /// * `IncorrectSignIn` - Password mismatch
    /// * `Crypto` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn sign_in(&self, command: SignInCommand) -> Result<IssuedTokens, UserError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token itself is not rotated.
    ///
    /// # Errors
    /// * `InvalidRefresh` - Token is malformed, expired or carries no email
    /// * `Unauthorized` - The account behind the token is gone
    /// * `Crypto` - Keys unavailable
    /// * `DatabaseError` - Database operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, UserError>;
}
