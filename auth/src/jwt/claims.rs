use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Issuer of every token minted by this service.
pub const ISSUER: &str = "focust";

/// Minimal identity projection carried between services and into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtDetails {
    pub id: i64,
    pub email: String,
}

impl JwtDetails {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// JWT claims issued by this service.
///
/// `iss`, `iat` and `exp` are mandatory. Unknown claims are kept in `extra`
/// rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Email of the token owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims for a user with expiration relative to `issued_at`.
    ///
    /// # Arguments
    /// * `issuer` - Value of the `iss` claim
    /// * `details` - Identity whose email goes into the `email` claim
    /// * `issued_at` - Issuance instant
    /// * `lifetime` - Duration until the token expires
    pub fn for_user(
        issuer: impl Into<String>,
        details: &JwtDetails,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            iss: issuer.into(),
            email: Some(details.email.clone()),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            extra: HashMap::new(),
        }
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Seconds between issuance and expiry.
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }

    /// A token is live while `exp > now`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }

    pub fn is_issued_in_future(&self, current_timestamp: i64) -> bool {
        self.iat > current_timestamp
    }
}
