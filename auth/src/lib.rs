//! Credential and session primitives.
//!
//! - Password hashing (Argon2id)
//! - Signed bearer tokens with a tri-state verification result
//! - Authentication coordination
//!
//! Services define their own account ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenService, TokenVerification};
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_loaded_from_config", "HMAC-SHA256", Duration::seconds(1800)).unwrap();
//! let token = tokens.issue("u@x.com").unwrap();
//! match tokens.verify(&token) {
//!     TokenVerification::Valid(payload) => assert_eq!(payload.subject, "u@x.com"),
//!     _ => unreachable!(),
//! }
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenPayload;
pub use jwt::TokenService;
pub use jwt::TokenVerification;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::MAX_PASSWORD_BYTES;
