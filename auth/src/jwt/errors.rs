use thiserror::Error;

/// Error type for token service construction and issuance.
///
/// Verification never errors; see [`TokenVerification`](super::TokenVerification).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token secret must not be empty")]
    EmptySecret,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token TTL must be positive, got {0} seconds")]
    InvalidTtl(i64),
}
