use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::bounded;
use super::QueryFailure;
use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

fn store_unavailable(e: QueryFailure) -> AccountError {
    tracing::error!(error = %e, "Account store query failed");
    AccountError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        // Two rows are enough to tell a unique match from a duplicate.
        let mut rows = bounded(
            self.query_timeout,
            sqlx::query_as::<_, AccountRow>(
                r#"
                SELECT id, email, password_hash, created_at
                FROM accounts
                WHERE email = $1
                LIMIT 2
                "#,
            )
            .bind(email)
            .fetch_all(&self.pool),
        )
        .await
        .map_err(store_unavailable)?;

        if rows.len() > 1 {
            tracing::error!(email = %email, "Duplicate accounts stored for email");
            return Err(AccountError::IntegrityViolation(email.to_string()));
        }

        rows.pop().map(Account::try_from).transpose()
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        bounded(
            self.query_timeout,
            sqlx::query(
                r#"
                INSERT INTO accounts (id, email, password_hash, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(account.id.0)
            .bind(account.email.as_str())
            .bind(&account.password_hash)
            .bind(account.created_at)
            .execute(&self.pool),
        )
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                return AccountError::AlreadyExists(account.email.as_str().to_string());
            }
            store_unavailable(e)
        })?;

        Ok(account)
    }
}
