use std::fmt;
use std::str::FromStr;

use auth::BcryptHash;
use auth::JwtDetails;
use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: BcryptHash,
    pub registration_date: DateTime<Utc>,
}

impl User {
    /// Identity projection carried into tokens.
    pub fn details(&self) -> JwtDetails {
        JwtDetails::new(self.id.0, self.email.as_str())
    }
}

/// User unique identifier type
///
/// Server-assigned, non-negative and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not an integer
    /// * `Negative` - Integer is below zero
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        let id = s
            .parse::<i64>()
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))?;

        Self::new(id)
    }

    pub fn new(id: i64) -> Result<Self, UserIdError> {
        if id < 0 {
            return Err(UserIdError::Negative(id));
        }
        Ok(Self(id))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Comparison is
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User row about to be persisted; the directory assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: BcryptHash,
    pub registration_date: DateTime<Utc>,
}

impl NewUser {
    pub fn new(email: EmailAddress, password_hash: BcryptHash) -> Self {
        Self {
            email,
            password_hash,
            registration_date: Utc::now(),
        }
    }
}

/// User view safe to expose externally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonSensitiveUserView {
    pub id: UserId,
    pub email: EmailAddress,
}

impl From<&User> for NonSensitiveUserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Zero-based page of a listing with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    index: u32,
    size: u32,
}

impl PageRequest {
    pub const PAGE_SIZE: u32 = 15;

    pub fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// Build a request from the 1-based page number used by clients.
    ///
    /// # Errors
    /// * `InvalidPageNumber` - `page_number` is below 1 or too large
    pub fn from_page_number(page_number: i64) -> Result<Self, UserError> {
        if page_number < 1 {
            return Err(UserError::InvalidPageNumber(page_number));
        }
        let index =
            u32::try_from(page_number - 1).map_err(|_| UserError::InvalidPageNumber(page_number))?;

        Ok(Self::new(index, Self::PAGE_SIZE))
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows preceding this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.index) * u64::from(self.size)
    }
}

/// One page of entries plus the total number of rows across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub entries: Vec<T>,
    pub index: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            entries: self.entries.into_iter().map(f).collect(),
            index: self.index,
            total: self.total,
        }
    }
}
