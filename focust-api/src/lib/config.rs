use std::env;
use std::path::PathBuf;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub rsa: RsaKeyConfig,
    #[serde(default = "default_clock_skew_seconds")]
    pub clock_skew_seconds: u64,
}

/// Locations of the token signing keys.
#[derive(Debug, Deserialize, Clone)]
pub struct RsaKeyConfig {
    /// X.509 SubjectPublicKeyInfo, DER or PEM
    #[serde(alias = "public-key")]
    pub public_key: PathBuf,
    /// PKCS#8 private key, DER or PEM
    #[serde(alias = "private-key")]
    pub private_key: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Report unknown accounts as a wrong password on sign-in.
    #[serde(default)]
    pub uniform_sign_in_failures: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
            uniform_sign_in_failures: false,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_clock_skew_seconds() -> u64 {
    30
}

fn default_bcrypt_cost() -> u32 {
    auth::PasswordHasher::DEFAULT_COST
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (FOCUST__DATABASE__URL, FOCUST__SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: FOCUST__SERVER__ALLOWED_ORIGINS=https://a.example,https://b.example
            .add_source(
                Environment::with_prefix("FOCUST")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins"),
            )
            .build()?;

        configuration.try_deserialize()
    }
}
