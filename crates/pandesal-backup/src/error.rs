//! # Transfer Error Types
//!
//! Errors of the propagating tier: both CSV exports, backup creation and the
//! storage-info query. Restore never produces one of these; it folds every
//! failure into a [`RestoreOutcome`](pandesal_core::RestoreOutcome).
//!
//! ```text
//! ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐
//! │     Store       │  │    Rendering    │  │    Delivery     │
//! │                 │  │                 │  │                 │
//! │  DbError        │  │  ExportError    │  │  io::Error      │
//! │  (read failed)  │  │  (csv / json)   │  │  (sink failed)  │
//! └─────────────────┘  └─────────────────┘  └─────────────────┘
//! ```

use thiserror::Error;

use pandesal_core::ExportError;
use pandesal_db::DbError;

/// Result type alias for transfer operations.
pub type TransferResult<T> = Result<T, TransferError>;

#[derive(Debug, Error)]
pub enum TransferError {
    /// Reading the collections failed.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Building the file contents failed.
    #[error("Rendering failed: {0}")]
    Render(#[from] ExportError),

    /// The finished file could not be handed over.
    #[error("Could not deliver export file: {0}")]
    Delivery(#[from] std::io::Error),
}
