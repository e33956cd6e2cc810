use std::sync::Arc;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;
use super::keys::KeyProvider;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. The algorithm is pinned to RS256: tokens
/// whose header advertises anything else (HS256, `none`, ...) are rejected
/// before the signature is looked at.
pub struct JwtHandler {
    keys: Arc<KeyProvider>,
    issuer: String,
    leeway_seconds: u64,
}

impl JwtHandler {
    const ALGORITHM: Algorithm = Algorithm::RS256;

    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `keys` - RSA key provider (private key signs, public key verifies)
    /// * `issuer` - Required value of the `iss` claim on decode
    pub fn new(keys: Arc<KeyProvider>, issuer: impl Into<String>) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            leeway_seconds: 0,
        }
    }

    /// Tolerate clock differences of up to `seconds` when checking `exp`.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    /// Encode claims into an RS256-signed compact JWS.
    ///
    /// # Errors
    /// * `KeyUnavailable` - The private key cannot be loaded
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let key = self.keys.private_key()?;
        let header = Header::new(Self::ALGORITHM);

        encode(&header, claims, key).map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// Checks the RS256 signature, the issuer and `exp`. Other registered
    /// claims such as `aud` are carried through unchecked.
    ///
    /// # Errors
    /// * `KeyUnavailable` - The public key cannot be loaded
    /// * `TokenExpired` - `exp` is in the past (beyond the leeway)
    /// * `InvalidToken` - Malformed token, wrong algorithm, bad signature or issuer
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let key = self.keys.public_key()?;

        let mut validation = Validation::new(Self::ALGORITHM);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.leeway = self.leeway_seconds;

        let token_data = decode::<T>(token, key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::InvalidToken(e.to_string()),
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::EncodingKey;
    use serde::Deserialize;

    use super::*;
    use crate::jwt::keys::KeyMaterial;

    const PUBLIC_DER: &[u8] = include_bytes!("../../testdata/public_key.der");
    const PRIVATE_DER: &[u8] = include_bytes!("../../testdata/private_key.der");
    const OTHER_PUBLIC_DER: &[u8] = include_bytes!("../../testdata/other_public_key.der");
    const OTHER_PRIVATE_DER: &[u8] = include_bytes!("../../testdata/other_private_key.der");

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        iss: String,
        exp: i64,
        role: String,
    }

    fn handler(public: &[u8], private: &[u8]) -> JwtHandler {
        let material = KeyMaterial::from_bytes(public, private).expect("Failed to load keys");
        JwtHandler::new(Arc::new(KeyProvider::from_material(material)), "focust")
    }

    fn claims(iss: &str, exp_offset: i64) -> TestClaims {
        TestClaims {
            iss: iss.to_string(),
            exp: chrono::Utc::now().timestamp() + exp_offset,
            role: "admin".to_string(),
        }
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = handler(PUBLIC_DER, PRIVATE_DER);
        let claims = claims("focust", 60);

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        let decoded: TestClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = handler(PUBLIC_DER, PRIVATE_DER);

        let result = handler.decode::<TestClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_with_wrong_key() {
        let signer = handler(OTHER_PUBLIC_DER, OTHER_PRIVATE_DER);
        let verifier = handler(PUBLIC_DER, PRIVATE_DER);

        let token = signer.encode(&claims("focust", 60)).unwrap();

        let result = verifier.decode::<TestClaims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_rejects_hmac_signed_with_public_key() {
        let handler = handler(PUBLIC_DER, PRIVATE_DER);

        // Algorithm confusion: HS256 keyed with the (public) RSA key bytes
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims("focust", 60),
            &EncodingKey::from_secret(PUBLIC_DER),
        )
        .unwrap();

        let result = handler.decode::<TestClaims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_rejects_unsigned_token() {
        let handler = handler(PUBLIC_DER, PRIVATE_DER);
        let token = handler.encode(&claims("focust", 60)).unwrap();
        let payload = token.split('.').nth(1).unwrap();

        // {"alg":"none","typ":"JWT"}
        let unsigned = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{}.", payload);

        let result = handler.decode::<TestClaims>(&unsigned);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_rejects_wrong_issuer() {
        let handler = handler(PUBLIC_DER, PRIVATE_DER);
        let token = handler.encode(&claims("someone-else", 60)).unwrap();

        let result = handler.decode::<TestClaims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_expired() {
        let handler = handler(PUBLIC_DER, PRIVATE_DER);
        let token = handler.encode(&claims("focust", -120)).unwrap();

        let result = handler.decode::<TestClaims>(&token);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_leeway_accepts_recently_expired() {
        let handler = handler(PUBLIC_DER, PRIVATE_DER).with_leeway(300);
        let token = handler.encode(&claims("focust", -120)).unwrap();

        assert!(handler.decode::<TestClaims>(&token).is_ok());
    }

    #[test]
    fn test_unavailable_keys() {
        let handler = JwtHandler::new(
            Arc::new(KeyProvider::from_paths("/nonexistent/public.der", "/nonexistent/private.der")),
            "focust",
        );

        assert!(matches!(
            handler.encode(&claims("focust", 60)),
            Err(JwtError::KeyUnavailable(_))
        ));
        assert!(matches!(
            handler.decode::<TestClaims>("a.b.c"),
            Err(JwtError::KeyUnavailable(_))
        ));
    }
}
