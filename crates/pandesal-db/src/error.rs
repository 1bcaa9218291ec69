//! # Store Errors
//!
//! ```text
//! sqlx::Error ──► DbError ──┬──► TransferError   export, backup
//!                           └──► ApiError        printed for the cashier
//! ```
//!
//! Restore never surfaces a `DbError`; it logs one and reports a
//! `RestoreOutcome`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// No row with this id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// An explicit key collided with an existing row, e.g. a backup file
    /// listing the same sale item id twice.
    #[error("Duplicate key in {table}.{column}")]
    DuplicateKey { table: String, column: String },

    /// The store file could not be opened.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Commit of a multi-table write failed. Nothing was written.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Parses SQLite's `UNIQUE constraint failed: <table>.<column>` text.
    fn from_unique_message(msg: &str) -> Option<Self> {
        let target = msg.strip_prefix("UNIQUE constraint failed: ")?;
        // Composite keys list several columns; the first names the table.
        let first = target.split(',').next()?.trim();
        let (table, column) = first.split_once('.')?;
        Some(DbError::DuplicateKey {
            table: table.to_string(),
            column: column.to_string(),
        })
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                DbError::from_unique_message(msg)
                    .unwrap_or_else(|| DbError::QueryFailed(msg.to_string()))
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
