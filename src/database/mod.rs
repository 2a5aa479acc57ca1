pub mod models;
pub mod pool;
pub mod query;

pub use pool::{connect, health_check};
pub use query::ListQuery;

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::filter::FilterError;

/// Errors raised by the record facades.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("record not found")]
    NotFound,

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("database operation timed out")]
    Timeout,

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for ModelError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ModelError::NotFound,
            sqlx::Error::Database(db) if is_constraint_code(db.code().as_deref()) => {
                ModelError::Constraint(db.message().to_string())
            }
            other => ModelError::Sqlx(other),
        }
    }
}

// Postgres integrity-constraint class 23xxx: foreign key, unique, not-null, check.
fn is_constraint_code(code: Option<&str>) -> bool {
    matches!(code, Some(c) if c.starts_with("23"))
}

/// Run one database round trip under the configured per-statement deadline.
/// On expiry the operation fails with `ModelError::Timeout`; single statements
/// are atomic, so no partial state is left behind.
pub(crate) async fn with_deadline<T, F>(fut: F) -> Result<T, ModelError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    let deadline = Duration::from_secs(crate::config::config().database.statement_timeout);
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result.map_err(ModelError::from),
        Err(_) => Err(ModelError::Timeout),
    }
}
