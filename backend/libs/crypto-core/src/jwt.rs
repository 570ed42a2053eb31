/// Session token signing and validation for the portfolio backend
///
/// Tokens are HS256 JWTs signed with a server-held secret. A `JwtManager` is
/// built once at startup and handed to the services that need it; nothing is
/// stored in process-global state.
///
/// ## Usage
///
/// ```rust
/// use crypto_core::jwt::JwtManager;
/// use uuid::Uuid;
///
/// let manager = JwtManager::from_secret("a-long-random-secret-of-at-least-32-bytes", 3600)
///     .expect("valid secret");
/// let token = manager.generate_access_token(Uuid::new_v4()).expect("signed");
/// let data = manager.validate_token(&token).expect("valid token");
/// assert_eq!(data.claims.token_type, "access");
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, TokenData,
    Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

/// Default access token lifetime (24 hours)
pub const DEFAULT_ACCESS_TOKEN_EXPIRY_SECS: i64 = 24 * 3600;

/// Secrets shorter than this are accepted but logged as weak
const RECOMMENDED_SECRET_LENGTH: usize = 32;

/// Clock skew tolerated when checking `exp`; a token stays valid this long past expiry
pub const VALIDATION_LEEWAY_SECS: u64 = 5;

/// Symmetric algorithm only; the header algorithm is never trusted
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT secret must not be empty")]
    EmptySecret,

    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

pub type Result<T> = std::result::Result<T, JwtError>;

// ============================================================================
// Data Structures
// ============================================================================

/// JWT claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token identifier, used as the revocation key
    pub jti: String,
    /// Token type, always "access" today
    pub token_type: String,
}

impl Claims {
    /// Parse the subject as an account UUID
    pub fn subject_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| JwtError::Invalid(format!("malformed subject: {e}")))
    }

    /// Seconds until expiry, clamped at zero
    pub fn remaining_secs(&self) -> u64 {
        (self.exp - Utc::now().timestamp()).max(0) as u64
    }
}

// ============================================================================
// Manager
// ============================================================================

/// Holds the signing keys and token lifetime
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl: Duration,
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("access_token_ttl", &self.access_token_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtManager {
    /// Build a manager from a shared secret
    ///
    /// ## Errors
    ///
    /// Returns `JwtError::EmptySecret` when the secret is empty or whitespace.
    pub fn from_secret(secret: &str, access_token_ttl_secs: i64) -> Result<Self> {
        if secret.trim().is_empty() {
            return Err(JwtError::EmptySecret);
        }

        if secret.len() < RECOMMENDED_SECRET_LENGTH {
            tracing::warn!(
                length = secret.len(),
                recommended = RECOMMENDED_SECRET_LENGTH,
                "JWT secret is shorter than recommended"
            );
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_ttl: Duration::seconds(access_token_ttl_secs),
        })
    }

    /// Access token lifetime in seconds
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl.num_seconds()
    }

    /// Generate a new access token for an account
    pub fn generate_access_token(&self, account_id: Uuid) -> Result<String> {
        self.generate_token_with_ttl(account_id, self.access_token_ttl)
    }

    /// Generate a token with an explicit lifetime
    ///
    /// A negative lifetime produces an already-expired token, which is useful
    /// when exercising expiry handling.
    pub fn generate_token_with_ttl(&self, account_id: Uuid, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let expiry = now + ttl;

        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: "access".to_string(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    /// Validate and decode a token (without the "Bearer " prefix)
    ///
    /// Verifies the HS256 signature and `exp`. Expiry is reported separately
    /// from every other failure.
    pub fn validate_token(&self, token: &str) -> Result<TokenData<Claims>> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = VALIDATION_LEEWAY_SECS;

        decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Invalid(e.to_string()),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-0123456789-abcdefghijklmnop";

    fn manager() -> JwtManager {
        JwtManager::from_secret(TEST_SECRET, 3600).expect("valid secret")
    }

    #[test]
    fn test_generate_access_token() {
        let token = manager().generate_access_token(Uuid::new_v4()).unwrap();
        assert_eq!(token.matches('.').count(), 2); // JWT has 3 parts
    }

    #[test]
    fn test_validate_valid_token() {
        let manager = manager();
        let account_id = Uuid::new_v4();
        let token = manager.generate_access_token(account_id).unwrap();

        let data = manager.validate_token(&token).unwrap();
        assert_eq!(data.claims.sub, account_id.to_string());
        assert_eq!(data.claims.subject_id().unwrap(), account_id);
        assert_eq!(data.claims.token_type, "access");
        assert_eq!(data.claims.exp - data.claims.iat, 3600);
    }

    #[test]
    fn test_each_token_gets_unique_jti() {
        let manager = manager();
        let account_id = Uuid::new_v4();
        let a = manager.generate_access_token(account_id).unwrap();
        let b = manager.generate_access_token(account_id).unwrap();

        let jti_a = manager.validate_token(&a).unwrap().claims.jti;
        let jti_b = manager.validate_token(&b).unwrap().claims.jti;
        assert_ne!(jti_a, jti_b);
    }

    #[test]
    fn test_validate_invalid_token() {
        assert!(matches!(
            manager().validate_token("invalid.token.here"),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_validate_tampered_signature() {
        let manager = manager();
        let token = manager.generate_access_token(Uuid::new_v4()).unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut sig: Vec<char> = signature.chars().collect();
        sig[0] = if sig[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{}", sig.into_iter().collect::<String>());

        assert!(matches!(
            manager.validate_token(&tampered),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let other = JwtManager::from_secret("another-secret-entirely-0123456789xyz", 3600).unwrap();
        let token = other.generate_access_token(Uuid::new_v4()).unwrap();

        assert!(manager().validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = manager();
        let token = manager
            .generate_token_with_ttl(Uuid::new_v4(), Duration::hours(-2))
            .unwrap();

        assert!(matches!(
            manager.validate_token(&token),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            JwtManager::from_secret("   ", 3600),
            Err(JwtError::EmptySecret)
        ));
    }

    #[test]
    fn test_remaining_secs_clamped() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: 0,
            exp: 10,
            jti: "x".into(),
            token_type: "access".into(),
        };
        assert_eq!(claims.remaining_secs(), 0);
    }
}
