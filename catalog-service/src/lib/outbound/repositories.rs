use std::future::Future;
use std::time::Duration;

use thiserror::Error;

pub mod account;
pub mod book;

pub use account::PostgresAccountRepository;
pub use book::PostgresBookRepository;

/// Failure of a single bounded query.
#[derive(Debug, Error)]
pub(crate) enum QueryFailure {
    #[error("query timed out after {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl QueryFailure {
    pub(crate) fn is_unique_violation(&self) -> bool {
        match self {
            QueryFailure::Database(e) => e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation()),
            QueryFailure::TimedOut(_) => false,
        }
    }
}

/// Run `query`, giving up after `limit`.
pub(crate) async fn bounded<T, F>(limit: Duration, query: F) -> Result<T, QueryFailure>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result.map_err(QueryFailure::Database),
        Err(_) => Err(QueryFailure::TimedOut(limit)),
    }
}
