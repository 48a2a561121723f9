use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Default token lifetime.
pub const DEFAULT_EXPIRY_HOURS: u64 = 6;

/// Claims carried by an issued token: the caller's payload plus timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token secret is not configured")]
    MissingSecret,

    #[error("Token expiry of {0} hours is out of range")]
    InvalidExpiry(u64),

    #[error("Token payload must be a JSON object")]
    PayloadNotObject,

    #[error("Token generation error: {0}")]
    Encoding(jsonwebtoken::errors::Error),

    #[error("Invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Issues and verifies HS256 tokens with a fixed lifetime.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let ttl = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or(TokenError::InvalidExpiry(expiry_hours))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Payloads are caller-defined, so an `aud` claim is carried, not enforced
        validation.validate_aud = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, payload: Value) -> Result<String, TokenError> {
        self.issue_at(payload, Utc::now())
    }

    /// Sign `payload` as if issued at `issued_at`. Reserved `iat`/`exp`
    /// keys in the payload are replaced.
    pub fn issue_at(&self, payload: Value, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let Value::Object(mut payload) = payload else {
            return Err(TokenError::PayloadNotObject);
        };
        payload.remove("iat");
        payload.remove("exp");

        let claims = TokenClaims {
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
            payload,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(TokenError::Encoding)
    }

    /// Check signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}
