use std::fmt;
use std::str::FromStr;

use super::errors::PasswordError;

/// Characters of the bcrypt flavour of base64.
const BCRYPT_ALPHABET: &[u8] = b"./ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

const SALT_LENGTH: usize = 22;
const DIGEST_LENGTH: usize = 31;

/// bcrypt crypt string revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BcryptVersion {
    TwoA,
    TwoB,
    TwoY,
}

impl BcryptVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            BcryptVersion::TwoA => "2a",
            BcryptVersion::TwoB => "2b",
            BcryptVersion::TwoY => "2y",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "2a" => Some(BcryptVersion::TwoA),
            "2b" => Some(BcryptVersion::TwoB),
            "2y" => Some(BcryptVersion::TwoY),
            _ => None,
        }
    }
}

impl From<BcryptVersion> for ::bcrypt::Version {
    fn from(version: BcryptVersion) -> Self {
        match version {
            BcryptVersion::TwoA => ::bcrypt::Version::TwoA,
            BcryptVersion::TwoB => ::bcrypt::Version::TwoB,
            BcryptVersion::TwoY => ::bcrypt::Version::TwoY,
        }
    }
}

/// Parsed bcrypt crypt string: `$<version>$<cost>$<salt><digest>`.
///
/// Immutable once parsed. Only ever built from an existing crypt string;
/// producing one from a plaintext password goes through [`PasswordHasher`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BcryptHash {
    version: BcryptVersion,
    cost: u32,
    salt: String,
    digest: String,
}

impl BcryptHash {
    pub const MIN_COST: u32 = 4;
    pub const MAX_COST: u32 = 31;

    /// Parse a bcrypt crypt string.
    ///
    /// # Arguments
    /// * `s` - Crypt string such as `$2b$12$<22 salt chars><31 digest chars>`
    ///
    /// # Returns
    /// Parsed hash whose `Display` output equals `s`
    ///
    /// # Errors
    /// * `InvalidHash` - Wrong number of segments, unknown version, cost outside
    ///   4..=31, wrong salt/digest length, or characters outside the bcrypt alphabet
    pub fn from_string(s: &str) -> Result<Self, PasswordError> {
        let rest = s
            .strip_prefix('$')
            .ok_or_else(|| PasswordError::InvalidHash("missing leading '$'".to_string()))?;

        let parts: Vec<&str> = rest.split('$').collect();
        if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
            return Err(PasswordError::InvalidHash(
                "expected three '$'-separated segments".to_string(),
            ));
        }

        let version = BcryptVersion::parse(parts[0]).ok_or_else(|| {
            PasswordError::InvalidHash("only '2a', '2b' and '2y' are accepted".to_string())
        })?;
        let cost = Self::parse_cost(parts[1])?;
        let (salt, digest) = Self::split_salt_and_digest(parts[2])?;

        Ok(Self {
            version,
            cost,
            salt: salt.to_string(),
            digest: digest.to_string(),
        })
    }

    fn parse_cost(s: &str) -> Result<u32, PasswordError> {
        // Two digits keeps formatting and parsing symmetric ("04", not "4").
        if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PasswordError::InvalidHash(
                "cost must be two decimal digits".to_string(),
            ));
        }
        let cost: u32 = s
            .parse()
            .map_err(|_| PasswordError::InvalidHash("cost is not a number".to_string()))?;
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidHash(format!(
                "cost {} outside {}..={}",
                cost,
                Self::MIN_COST,
                Self::MAX_COST
            )));
        }
        Ok(cost)
    }

    fn split_salt_and_digest(s: &str) -> Result<(&str, &str), PasswordError> {
        if s.len() != SALT_LENGTH + DIGEST_LENGTH {
            return Err(PasswordError::InvalidHash(format!(
                "salt and digest must be {} characters, got {}",
                SALT_LENGTH + DIGEST_LENGTH,
                s.len()
            )));
        }
        if !s.bytes().all(|b| BCRYPT_ALPHABET.contains(&b)) {
            return Err(PasswordError::InvalidHash(
                "salt and digest must use the bcrypt base64 alphabet".to_string(),
            ));
        }
        Ok(s.split_at(SALT_LENGTH))
    }

    pub fn version(&self) -> BcryptVersion {
        self.version
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl fmt::Display for BcryptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}${:02}${}{}",
            self.version.as_str(),
            self.cost,
            self.salt,
            self.digest
        )
    }
}

// Never print the digest, even in debug output.
impl fmt::Debug for BcryptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BcryptHash")
            .field("version", &self.version)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

impl FromStr for BcryptHash {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Password hashing implementation.
///
/// Produces and checks bcrypt hashes with a fixed version and cost.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
    version: BcryptVersion,
}

impl PasswordHasher {
    pub const DEFAULT_COST: u32 = 12;

    /// Create a hasher producing `$2b$` hashes at the given cost.
    ///
    /// # Errors
    /// * `EncodingError` - Cost outside 4..=31
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        Self::with_version(cost, BcryptVersion::TwoB)
    }

    pub fn with_version(cost: u32, version: BcryptVersion) -> Result<Self, PasswordError> {
        if !(BcryptHash::MIN_COST..=BcryptHash::MAX_COST).contains(&cost) {
            return Err(PasswordError::EncodingError(format!(
                "bcrypt cost {} outside {}..={}",
                cost,
                BcryptHash::MIN_COST,
                BcryptHash::MAX_COST
            )));
        }
        Ok(Self { cost, version })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh random 16-byte salt.
    ///
    /// # Errors
    /// * `EncodingError` - The bcrypt primitive failed
    pub fn encode(&self, password: &str) -> Result<BcryptHash, PasswordError> {
        let parts = ::bcrypt::hash_with_result(password, self.cost)
            .map_err(|e| PasswordError::EncodingError(e.to_string()))?;

        BcryptHash::from_string(&parts.format_for_version(self.version.into()))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// The hash's own version and cost are used; the digest comparison is
    /// constant-time.
    ///
    /// # Errors
    /// * `EncodingError` - The bcrypt primitive failed
    pub fn matches(&self, password: &str, hash: &BcryptHash) -> Result<bool, PasswordError> {
        ::bcrypt::verify(password, &hash.to_string())
            .map_err(|e| PasswordError::EncodingError(e.to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
            version: BcryptVersion::TwoB,
        }
    }
}
