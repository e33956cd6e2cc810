use std::sync::Arc;

use async_trait::async_trait;
use auth::BcryptHash;
use auth::JwtDetails;
use auth::PasswordHasher;
use auth::TokenService;

use crate::domain::auth::models::IssuedTokens;
use crate::domain::auth::models::RefreshedAccess;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::SignInCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::NewUser;
use crate::user::errors::UserError;
use crate::user::ports::UserDirectory;

/// Hashed once at startup; unknown-account sign-ins are verified against it.
const TIMING_PASSWORD: &str = "focust-timing-equalizer";

/// Domain service implementation for registration, sign-in and refresh.
///
/// Bcrypt work is moved off the async workers with `spawn_blocking`.
pub struct AuthService<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
    tokens: Arc<TokenService>,
    password_hasher: PasswordHasher,
    timing_hash: BcryptHash,
    uniform_sign_in_failures: bool,
}

impl<D> AuthService<D>
where
    D: UserDirectory,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - User persistence implementation
    /// * `tokens` - Token minting and validation
    /// * `password_hasher` - Cost and version for new password hashes
    ///
    /// # Errors
    /// * `Password` - The timing hash could not be computed
    pub fn new(
        directory: Arc<D>,
        tokens: Arc<TokenService>,
        password_hasher: PasswordHasher,
    ) -> Result<Self, UserError> {
        let timing_hash = password_hasher.encode(TIMING_PASSWORD)?;

        Ok(Self {
            directory,
            tokens,
            password_hasher,
            timing_hash,
            uniform_sign_in_failures: false,
        })
    }

    /// Report unknown accounts as `IncorrectSignIn` instead of `UserNotFound`.
    pub fn with_uniform_sign_in_failures(mut self, enabled: bool) -> Self {
        self.uniform_sign_in_failures = enabled;
        self
    }

    async fn encode_password(&self, password: String) -> Result<BcryptHash, UserError> {
        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || hasher.encode(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn verify_password(&self, password: String, hash: BcryptHash) -> Result<bool, UserError> {
        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || hasher.matches(&password, &hash))
            .await
            .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?
            .map_err(UserError::from)
    }

    fn issue(&self, details: JwtDetails) -> Result<IssuedTokens, UserError> {
        let access_token = self.tokens.mint_access(&details).map_err(|e| {
            tracing::error!(error = %e, user_id = details.id, "Failed to mint access token");
            UserError::from(e)
        })?;
        let refresh_token = self.tokens.mint_refresh(&details).map_err(|e| {
            tracing::error!(error = %e, user_id = details.id, "Failed to mint refresh token");
            UserError::from(e)
        })?;

        Ok(IssuedTokens {
            details,
            access_token,
            refresh_token,
        })
    }
}

#[async_trait]
impl<D> AuthServicePort for AuthService<D>
where
    D: UserDirectory,
{
    async fn register(&self, command: RegisterCommand) -> Result<IssuedTokens, UserError> {
        if self
            .directory
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::UserAlreadyExists);
        }

        let password_hash = self.encode_password(command.password).await?;

        // Concurrent registrations can both pass the check above
        let user = self
            .directory
            .save(NewUser::new(command.email, password_hash))
            .await
            .map_err(|e| match e {
                UserError::DuplicateEmail(_) => UserError::UserAlreadyExists,
                other => other,
            })?;

        tracing::info!(user_id = user.id.0, "User registered");

        self.issue(user.details())
    }

    async fn sign_in(&self, command: SignInCommand) -> Result<IssuedTokens, UserError> {
        let Some(user) = self.directory.find_by_email(&command.email).await? else {
            self.verify_password(command.password, self.timing_hash.clone())
                .await?;

            tracing::debug!("Sign-in for unknown account");
            return Err(if self.uniform_sign_in_failures {
                UserError::IncorrectSignIn
            } else {
                UserError::UserNotFound(command.email)
            });
        };

        if !self
            .verify_password(command.password, user.password_hash.clone())
            .await?
        {
            tracing::debug!(user_id = user.id.0, "Sign-in with incorrect password");
            return Err(UserError::IncorrectSignIn);
        }

        self.issue(user.details())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, UserError> {
        if !self.tokens.is_valid(refresh_token)? {
            return Err(UserError::InvalidRefresh);
        }

        let email = self
            .tokens
            .email_of(refresh_token)?
            .ok_or(UserError::InvalidRefresh)?;

        let user = self
            .directory
            .find_by_email(&email)
            .await?
            .ok_or(UserError::Unauthorized)?;

        let details = user.details();
        let access_token = self.tokens.mint_access(&details)?;

        Ok(RefreshedAccess {
            details,
            access_token,
        })
    }
}
