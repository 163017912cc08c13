use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AuthOutcome;
use crate::account::models::LoginCommand;
use crate::account::models::SignupCommand;

/// Port for signup and login.
#[async_trait]
pub trait AuthFlowPort: Send + Sync + 'static {
    /// Register a new account and issue a token for it.
    ///
    /// # Returns
    /// * `Committed` - Account inserted, token issued
    /// * `Rejected(Conflict)` - Email already registered (no write performed)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Account store failed or timed out
    /// * `Password` - Hashing failed
    /// * `Token` - Token issuance failed
    async fn signup(&self, command: SignupCommand) -> Result<AuthOutcome, AccountError>;

    /// Check credentials and issue a token. Never writes.
    ///
    /// # Returns
    /// * `Committed` - Credentials valid, token issued
    /// * `Rejected(Unauthorized)` - Unknown email or wrong password
    ///
    /// # Errors
    /// * `StoreUnavailable` - Account store failed or timed out
    /// * `Token` - Token issuance failed
    async fn login(&self, command: LoginCommand) -> Result<AuthOutcome, AccountError>;
}

/// Persistence operations for accounts.
///
/// Implementations must enforce email uniqueness at write time; the service
/// does no locking of its own.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve the account stored under `email`.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `IntegrityViolation` - More than one account matched
    /// * `StoreUnavailable` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Persist a new account.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `StoreUnavailable` - Store operation failed
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;
}
