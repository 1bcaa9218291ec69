//! # Error Types
//!
//! Domain-specific error types for pandesal-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pandesal-core errors (this file)                                      │
//! │  ├── CoreError        - Checkout and catalog rule violations           │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ExportError      - CSV / JSON rendering failures                  │
//! │                                                                         │
//! │  pandesal-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  pandesal-backup errors (separate crate)                               │
//! │  └── TransferError    - Export / backup failures (propagating tier)    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the operator sees                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised while building a checkout or editing the
/// catalog.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Product exists but has been switched off in the catalog.
    #[error("Product {name} (#{id}) is not active")]
    ProductInactive { id: i64, name: String },

    /// Checkout attempted with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout has more lines than allowed.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Customer cash does not cover the total.
    ///
    /// ## User Workflow
    /// ```text
    /// Total: ₱23.00, cash handed over: ₱20.00
    ///      │
    ///      ▼
    /// InsufficientCash { total: "23.00", cash: "20.00" }
    ///      │
    ///      ▼
    /// POS view asks for more cash
    /// ```
    #[error("Customer cash {cash} does not cover total {total}")]
    InsufficientCash { total: String, cash: String },

    /// A total left the representable range.
    #[error("Amount too large to compute")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before anything touches the store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (NaN amount, malformed date, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Export Error
// =============================================================================

/// Failures while rendering an export or backup document in memory.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer rejected a record.
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// The rendered buffer could not be finalized.
    #[error("Export buffer error: {0}")]
    Buffer(String),

    /// Backup document serialization failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for rendering Results.
pub type ExportResult<T> = Result<T, ExportError>;

// =============================================================================
// Unit Tests
// =============================================================================
