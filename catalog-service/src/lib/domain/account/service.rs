use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::account::errors::AccountError;
use crate::account::models::AccessToken;
use crate::account::models::Account;
use crate::account::models::AuthOutcome;
use crate::account::models::LoginCommand;
use crate::account::models::Rejection;
use crate::account::models::SignupCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthFlowPort;

/// Signup and login orchestration.
///
/// Stateless apart from the injected store and authenticator; any number of
/// requests may run through one instance concurrently. Argon2 work is moved
/// to tokio's blocking pool so it never stalls the I/O workers.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn run_blocking<T, F>(&self, work: F) -> Result<T, AccountError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || work(&authenticator))
            .await
            .map_err(|e| AccountError::Unknown(format!("Blocking task failed: {}", e)))
    }

    /// Reject a login that has no usable stored hash after the same Argon2
    /// work a wrong password costs.
    async fn reject_without_account(&self, password: String) -> Result<AuthOutcome, AccountError> {
        self.run_blocking(move |authenticator| authenticator.verify_decoy(&password))
            .await?;
        Ok(AuthOutcome::Rejected(Rejection::Unauthorized))
    }
}

#[async_trait]
impl<AR> AuthFlowPort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<AuthOutcome, AccountError> {
        let SignupCommand { email, password } = command;

        match self.repository.find_by_email(email.as_str()).await {
            Ok(None) => {}
            Ok(Some(_)) | Err(AccountError::IntegrityViolation(_)) => {
                tracing::info!(email = %email, "Signup rejected: account already exists");
                return Ok(AuthOutcome::Rejected(Rejection::Conflict));
            }
            Err(e) => return Err(e),
        }

        let password_hash = self
            .run_blocking(move |authenticator| authenticator.hash_password(password.as_str()))
            .await??;

        match self
            .repository
            .insert(Account::new(email.clone(), password_hash))
            .await
        {
            Ok(account) => {
                tracing::info!(account_id = %account.id, email = %email, "Account created");
            }
            Err(AccountError::AlreadyExists(_)) => {
                // A concurrent signup for the same email committed first
                tracing::info!(email = %email, "Signup rejected at insert: account already exists");
                return Ok(AuthOutcome::Rejected(Rejection::Conflict));
            }
            Err(e) => return Err(e),
        }

        let issued = self.authenticator.issue_token(email.as_str())?;

        Ok(AuthOutcome::Committed(AccessToken::new(issued.access_token)))
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthOutcome, AccountError> {
        let LoginCommand { email, password } = command;

        let account = match self.repository.find_by_email(&email).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                tracing::warn!(email = %email, "Login rejected: unknown email");
                return self.reject_without_account(password).await;
            }
            Err(AccountError::IntegrityViolation(_)) => {
                tracing::error!(email = %email, "Login rejected: duplicate accounts stored for email");
                return self.reject_without_account(password).await;
            }
            Err(e) => return Err(e),
        };

        if account.email.as_str() != email {
            tracing::error!(email = %email, "Login rejected: store returned a different email");
            return self.reject_without_account(password).await;
        }

        let stored_hash = account.password_hash;
        let result = self
            .run_blocking(move |authenticator| {
                authenticator.authenticate(&password, &stored_hash, &email)
            })
            .await?;

        match result {
            Ok(issued) => {
                tracing::info!(account_id = %account.id, "Login succeeded");
                Ok(AuthOutcome::Committed(AccessToken::new(issued.access_token)))
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(account_id = %account.id, "Login rejected: wrong password");
                Ok(AuthOutcome::Rejected(Rejection::Unauthorized))
            }
            Err(AuthenticationError::JwtError(e)) => Err(e.into()),
        }
    }
}
