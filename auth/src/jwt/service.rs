use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenPayload;
use super::errors::JwtError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Outcome of verifying a bearer token.
///
/// Callers facing untrusted clients should treat `Expired` and `Malformed`
/// identically; the distinction exists for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerification {
    Valid(TokenPayload),
    Expired,
    Malformed,
}

impl TokenVerification {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenVerification::Valid(_))
    }
}

/// Parse a configured algorithm name.
///
/// Accepts the descriptive `HMAC-SHA256` style as well as the JOSE `HS256`
/// names. Only symmetric HMAC algorithms are supported.
pub fn parse_algorithm(name: &str) -> Result<Algorithm, JwtError> {
    match name.trim().to_ascii_uppercase().as_str() {
        "HMAC-SHA256" | "HS256" => Ok(Algorithm::HS256),
        "HMAC-SHA384" | "HS384" => Ok(Algorithm::HS384),
        "HMAC-SHA512" | "HS512" => Ok(Algorithm::HS512),
        _ => Err(JwtError::UnsupportedAlgorithm(name.to_string())),
    }
}

/// Issues and verifies signed access tokens.
///
/// Secret, algorithm and TTL are fixed at construction and never change for
/// the lifetime of the service. The service holds no per-token state.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret (loaded from configuration, never a literal)
    /// * `algorithm` - Algorithm name, see [`parse_algorithm`]
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `EmptySecret` - Secret is empty
    /// * `UnsupportedAlgorithm` - Algorithm name is not a supported HMAC variant
    /// * `InvalidTtl` - TTL is zero or negative
    pub fn new(secret: &[u8], algorithm: &str, ttl: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }
        if ttl <= Duration::zero() {
            return Err(JwtError::InvalidTtl(ttl.num_seconds()));
        }
        let algorithm = parse_algorithm(algorithm)?;

        // Expiry is checked against the injected clock, not by jsonwebtoken,
        // so that expired and malformed tokens can be told apart.
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
            ttl,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Issue a token for `subject` expiring one TTL from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.clock.now(), self.ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature, then its expiry.
    pub fn verify(&self, token: &str) -> TokenVerification {
        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(reason = ?e.kind(), "Token rejected as malformed");
                return TokenVerification::Malformed;
            }
        };

        if claims.is_expired(self.clock.now().timestamp()) {
            tracing::debug!("Token rejected as expired");
            return TokenVerification::Expired;
        }

        match DateTime::from_timestamp(claims.exp, 0) {
            Some(expires_at) => TokenVerification::Valid(TokenPayload {
                subject: claims.sub,
                expires_at,
            }),
            None => {
                tracing::debug!("Token expiry is out of range");
                TokenVerification::Malformed
            }
        }
    }
}
