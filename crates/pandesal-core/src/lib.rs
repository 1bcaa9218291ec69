//! # pandesal-core: Pure Records and Rendering for Pandesal POS
//!
//! This crate holds everything about the bakery's data that does not need a
//! database: the three record types, checkout arithmetic, validation, and the
//! renderers that turn collections into CSV exports and JSON backups.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pandesal POS Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Views (POS / Sales / Products)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          pandesal-backup (export / backup / restore)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pandesal-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  export   │  │  backup   │  │   │
//! │  │   │  Product  │  │   Money   │  │ sales.csv │  │ document  │  │   │
//! │  │   │   Sale    │  │ checkout  │  │ prod.csv  │  │  stats    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  pandesal-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (Product, Sale, SaleItem) and collection snapshots
//! - [`money`] - Integer-cent money used for checkout arithmetic
//! - [`checkout`] - Cart to sale + line items
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for catalog edits and checkout
//! - [`export`] - CSV rendering for sales and products
//! - [`backup`] - Backup document model, stats and shape validation
//!
//! ## Example Usage
//!
//! ```rust
//! use pandesal_core::money::Money;
//!
//! let price = Money::from_decimal(3.0);
//! let subtotal = price.checked_mul_quantity(4).unwrap();
//! assert_eq!(subtotal.to_decimal(), 12.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod checkout;
pub mod error;
pub mod export;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use backup::{BackupDocument, BackupStats, RestoreOutcome};
pub use checkout::{build_checkout, CheckoutDraft};
pub use error::{CoreError, ExportError, ValidationError};
pub use export::DisplayZone;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Format version written into every backup document.
pub const BACKUP_FORMAT_VERSION: &str = "1.0";

/// File name prefix for backups (`<prefix>-backup-<YYYY-MM-DD>.json`).
pub const DEFAULT_BACKUP_PREFIX: &str = "pandehabibi";

/// Maximum quantity of a single line at checkout.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest price or cash amount accepted, in whole pesos.
///
/// Keeps every checkout total far inside `i64` centavos.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Maximum number of lines in a single checkout.
pub const MAX_CART_LINES: usize = 100;
