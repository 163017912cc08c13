use crate::jwt::JwtError;
use crate::jwt::TokenService;
use crate::jwt::TokenVerification;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds only immutable state, so a single instance can be shared behind an
/// `Arc` by every request.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    decoy_hash: Option<String>,
}

// Hashed once at construction; only ever verified against
const DECOY_PASSWORD: &str = "decoy-password-never-assigned";

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator from already-configured parts.
    ///
    /// Hashes a decoy password with the configured cost, so construction takes
    /// as long as one signup hash.
    pub fn new(password_hasher: PasswordHasher, token_service: TokenService) -> Self {
        let decoy_hash = match password_hasher.hash(DECOY_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to hash decoy password");
                None
            }
        };

        Self {
            password_hasher,
            token_service,
            decoy_hash,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Password too long or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Fail a login that has no stored hash to check against.
    ///
    /// Runs a full verification against the decoy hash so an unknown account
    /// costs the same Argon2 work as a wrong password. Always returns `false`.
    pub fn verify_decoy(&self, password: &str) -> bool {
        if let Some(decoy_hash) = &self.decoy_hash {
            let _ = self.password_hasher.verify(password, decoy_hash);
        }
        false
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject)?)
    }

    /// Issue a token without password verification.
    ///
    /// Used right after signup, where the caller has just chosen the password.
    pub fn issue_token(&self, subject: &str) -> Result<AuthenticationResult, JwtError> {
        let access_token = self.token_service.issue(subject)?;
        Ok(AuthenticationResult { access_token })
    }

    /// Validate a bearer token.
    pub fn validate_token(&self, token: &str) -> TokenVerification {
        self.token_service.verify(token)
    }
}
