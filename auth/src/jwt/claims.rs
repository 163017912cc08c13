use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Registered claims carried by an access token.
///
/// Every field is required: a token missing any of them fails to decode
/// and is treated as malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Token ID, unique per issuance
    pub jti: String,
}

impl Claims {
    /// Create claims for `subject` expiring `ttl` after `issued_at`.
    pub fn for_subject(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: subject.to_string(),
            exp: expiration.timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is still valid at the exact second of its expiry.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

/// Verified content of an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub subject: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::for_subject("u@x.com", issued_at, Duration::seconds(1800));

        assert_eq!(claims.sub, "u@x.com");
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: "u@x.com".to_string(),
            exp: 1000,
            iat: 0,
            jti: "t-1".to_string(),
        };

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_claims_serialize_to_registered_names() {
        let claims = Claims {
            sub: "u@x.com".to_string(),
            exp: 2000,
            iat: 200,
            jti: "t-2".to_string(),
        };

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["sub"], "u@x.com");
        assert_eq!(value["exp"], 2000);
        assert_eq!(value["iat"], 200);
        assert_eq!(value["jti"], "t-2");
    }

    #[test]
    fn test_token_ids_are_unique() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let first = Claims::for_subject("u@x.com", issued_at, Duration::seconds(1800));
        let second = Claims::for_subject("u@x.com", issued_at, Duration::seconds(1800));

        assert_ne!(first.jti, second.jti);
    }
}
