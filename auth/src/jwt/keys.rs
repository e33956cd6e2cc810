use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::KeyError;

const PUBLIC_KEY_TAG: &str = "PUBLIC KEY";
const PRIVATE_KEY_TAG: &str = "PRIVATE KEY";

/// RSA key pair used to sign (private) and verify (public) RS256 tokens.
///
/// The public key is an X.509 SubjectPublicKeyInfo, the private key a PKCS#8
/// document. Both are accepted either as raw DER or PEM-armoured.
#[derive(Clone)]
pub struct KeyMaterial {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl KeyMaterial {
    /// Build key material from in-memory key documents.
    ///
    /// # Arguments
    /// * `public_key` - X.509 SubjectPublicKeyInfo (DER or PEM)
    /// * `private_key` - PKCS#8 private key (DER or PEM)
    ///
    /// # Errors
    /// * `InvalidKey` - A document cannot be parsed as an RSA key
    /// * `Mismatch` - The public key does not verify signatures of the private key
    pub fn from_bytes(public_key: &[u8], private_key: &[u8]) -> Result<Self, KeyError> {
        let decoding_key = DecodingKey::from_rsa_pem(&armour(public_key, PUBLIC_KEY_TAG))
            .map_err(|e| KeyError::InvalidKey {
                kind: "public",
                reason: e.to_string(),
            })?;
        let encoding_key = EncodingKey::from_rsa_pem(&armour(private_key, PRIVATE_KEY_TAG))
            .map_err(|e| KeyError::InvalidKey {
                kind: "private",
                reason: e.to_string(),
            })?;

        let material = Self {
            encoding_key,
            decoding_key,
        };
        material.check_pair()?;
        Ok(material)
    }

    /// Read and parse both key files.
    ///
    /// # Errors
    /// * `Io` - A file cannot be read
    /// * `InvalidKey` / `Mismatch` - See [`KeyMaterial::from_bytes`]
    pub fn load(public_key_path: &Path, private_key_path: &Path) -> Result<Self, KeyError> {
        let public_key = read_key_file(public_key_path)?;
        let private_key = read_key_file(private_key_path)?;
        Self::from_bytes(&public_key, &private_key)
    }

    pub fn public_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub fn private_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    // Sign and verify a throwaway payload so a broken pair fails at load time
    // instead of on the first request.
    fn check_pair(&self) -> Result<(), KeyError> {
        #[derive(Serialize, Deserialize)]
        struct Probe {
            probe: bool,
        }

        let token = encode(
            &Header::new(Algorithm::RS256),
            &Probe { probe: true },
            &self.encoding_key,
        )
        .map_err(|e| KeyError::InvalidKey {
            kind: "private",
            reason: e.to_string(),
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        decode::<Probe>(&token, &self.decoding_key, &validation)
            .map(|_| ())
            .map_err(|e| KeyError::Mismatch(e.to_string()))
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial").finish_non_exhaustive()
    }
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, KeyError> {
    std::fs::read(path).map_err(|e| KeyError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn armour(key: &[u8], tag: &str) -> Vec<u8> {
    if key.trim_ascii_start().starts_with(b"-----BEGIN") {
        key.to_vec()
    } else {
        pem::encode(&pem::Pem::new(tag, key.to_vec())).into_bytes()
    }
}

/// Process-wide provider of the RSA key pair.
///
/// Keys are read from the configured files on first use and cached for the
/// lifetime of the provider. Concurrent first calls may both read the files;
/// only one result is kept.
pub struct KeyProvider {
    source: KeySource,
    material: OnceLock<KeyMaterial>,
}

enum KeySource {
    Files {
        public_key_path: PathBuf,
        private_key_path: PathBuf,
    },
    Preloaded,
}

impl KeyProvider {
    /// Create a provider that lazily loads keys from files.
    pub fn from_paths(
        public_key_path: impl Into<PathBuf>,
        private_key_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: KeySource::Files {
                public_key_path: public_key_path.into(),
                private_key_path: private_key_path.into(),
            },
            material: OnceLock::new(),
        }
    }

    /// Create a provider around keys that are already parsed.
    pub fn from_material(material: KeyMaterial) -> Self {
        Self {
            source: KeySource::Preloaded,
            material: OnceLock::from(material),
        }
    }

    /// Return the cached key pair, loading it on first call.
    ///
    /// # Errors
    /// * `KeyError` - Files are missing or do not hold a valid RSA pair
    pub fn material(&self) -> Result<&KeyMaterial, KeyError> {
        if let Some(material) = self.material.get() {
            return Ok(material);
        }

        let loaded = match &self.source {
            KeySource::Files {
                public_key_path,
                private_key_path,
            } => KeyMaterial::load(public_key_path, private_key_path)?,
            KeySource::Preloaded => {
                return Err(KeyError::InvalidKey {
                    kind: "preloaded",
                    reason: "no key material present".to_string(),
                })
            }
        };

        tracing::info!("RSA key pair loaded");
        Ok(self.material.get_or_init(|| loaded))
    }

    pub fn public_key(&self) -> Result<&DecodingKey, KeyError> {
        self.material().map(KeyMaterial::public_key)
    }

    pub fn private_key(&self) -> Result<&EncodingKey, KeyError> {
        self.material().map(KeyMaterial::private_key)
    }
}
