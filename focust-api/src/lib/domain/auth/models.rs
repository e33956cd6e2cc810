use auth::JwtDetails;

use crate::domain::user::models::EmailAddress;

/// Command to register a new account with a validated email
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Command to sign an existing account in.
///
/// The email is taken verbatim; an address that cannot exist simply matches
/// no user.
#[derive(Debug)]
pub struct SignInCommand {
    pub email: String,
    pub password: String,
}

impl SignInCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

/// Token pair issued on register and sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedTokens {
    pub details: JwtDetails,
    pub access_token: String,
    pub refresh_token: String,
}

/// Fresh access token minted from a refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedAccess {
    pub details: JwtDetails,
    pub access_token: String,
}
