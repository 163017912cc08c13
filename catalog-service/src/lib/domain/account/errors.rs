use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password policy violations at signup
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for account operations.
///
/// Business outcomes (duplicate signup, bad credentials) are not errors; they
/// are reported as [`AuthOutcome::Rejected`](super::models::AuthOutcome).
/// `AlreadyExists` and `IntegrityViolation` are raised by the store and
/// folded into rejections by the service.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Store-reported conditions
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    #[error("More than one account stored for: {0}")]
    IntegrityViolation(String),

    // Infrastructure errors
    #[error("Account store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
