pub mod bcrypt;
pub mod errors;

pub use self::bcrypt::BcryptHash;
pub use self::bcrypt::BcryptVersion;
pub use self::bcrypt::PasswordHasher;
pub use errors::PasswordError;
