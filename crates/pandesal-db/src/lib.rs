//! # pandesal-db: Storage Layer for Pandesal POS
//!
//! This crate owns the local store: three collections (products, sales,
//! sale items) in one SQLite file, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pandesal POS Data Flow                           │
//! │                                                                         │
//! │  CLI command / pandesal-backup                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   pandesal-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ snapshot      │◄───│ SaleRepo      │    │ 001_init.sql │  │   │
//! │  │   │ replace_all   │    │ SaleItemRepo  │    │              │  │   │
//! │  │   │ storage_info  │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           seed.rs: default catalog on first run                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool and whole-store operations
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per collection
//! - [`seed`] - Default catalog for an empty store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pandesal_db::{seed_default_products, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/pandesal.db")).await?;
//! seed_default_products(&db).await?;
//!
//! let grid = db.products().list_active().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use seed::{seed_default_products, SeedOutcome};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::sale_item::SaleItemRepository;
