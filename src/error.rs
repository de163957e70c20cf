//! Error handler for mesa.

use sqlx::Error as SQLxError;
use thiserror::Error;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, AccountError>;

/// Enum representing account subsystem errors.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("validation error occurred")]
    Validation(#[from] ValidationErrors),

    #[error("SQL request failed: {0}")]
    Sql(#[from] SQLxError),

    #[error(transparent)]
    Crypto(#[from] crate::crypto::CryptoError),
}

impl AccountError {
    /// Whether the store rejected a write over a unique constraint.
    ///
    /// Email and username uniqueness is enforced by the database only, so a
    /// concurrent duplicate creation surfaces here rather than as a
    /// validation error. The operation is terminal either way.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Sql(err) => err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation()),
            _ => false,
        }
    }
}
